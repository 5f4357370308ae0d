//! Single-file operations: read, write, create, delete, copy, move, rename.

use std::fs;
use std::path::{Path, PathBuf};

use assistant_protocol::types::{CreateFileResult, FileContent, OpAck, RenameAck, TransferAck};

use crate::error::{FsError, Result};

pub fn read_file(file_path: &str) -> Result<FileContent> {
    let content = fs::read_to_string(file_path)
        .map_err(|e| FsError::io(format!("Error reading file {file_path}"), Some(file_path), e))?;
    Ok(FileContent {
        success: true,
        path: file_path.to_string(),
        content,
    })
}

/// Overwrite a file in place. The file is created when absent, but a missing
/// parent directory is an error.
pub fn update_file(file_path: &str, content: &str) -> Result<OpAck> {
    fs::write(file_path, content)
        .map_err(|e| FsError::io(format!("Failed to update file {file_path}"), Some(file_path), e))?;
    Ok(OpAck {
        success: true,
        message: format!("File {file_path} updated successfully"),
    })
}

/// Create (or overwrite) a file, making parent directories as needed.
pub fn create_file(file_path: &str, content: &str) -> Result<CreateFileResult> {
    let path = Path::new(file_path);
    ensure_parent(file_path)?;

    let existed_before = path.exists();
    fs::write(path, content)
        .map_err(|e| FsError::io(format!("Error creating file {file_path}"), Some(file_path), e))?;

    let verb = if existed_before { "overwritten" } else { "created" };
    Ok(CreateFileResult {
        success: true,
        message: format!("File {verb} at {file_path}"),
        path: file_path.to_string(),
        existed_before,
    })
}

pub fn delete_file(path: &str) -> Result<OpAck> {
    let subject = Path::new(path);
    if !subject.exists() {
        return Err(FsError::not_found(format!("File not found: {path}"), path));
    }
    if subject.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Path is a directory, use delete_directory instead: {path}"),
            path,
        ));
    }

    fs::remove_file(subject)
        .map_err(|e| FsError::io(format!("Error deleting file {path}"), Some(path), e))?;
    Ok(OpAck {
        success: true,
        message: format!("File deleted: {path}"),
    })
}

pub fn copy_file(source: &str, destination: &str) -> Result<TransferAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source file not found: {source}"),
            source,
        ));
    }
    if src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is a directory, use copy_directory instead: {source}"),
            source,
        ));
    }

    ensure_parent(destination)?;
    fs::copy(src, destination)
        .map_err(|e| FsError::io(format!("Error copying file {source}"), Some(destination), e))?;
    Ok(TransferAck {
        success: true,
        message: format!("File copied from {source} to {destination}"),
        source: source.to_string(),
        destination: destination.to_string(),
    })
}

pub fn move_file(source: &str, destination: &str) -> Result<TransferAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source file not found: {source}"),
            source,
        ));
    }
    if src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is a directory, use move_directory instead: {source}"),
            source,
        ));
    }

    ensure_parent(destination)?;
    let target = resolve_move_target(source, destination);
    fs::rename(src, &target)
        .map_err(|e| FsError::io(format!("Error moving file {source}"), Some(source), e))?;
    Ok(TransferAck {
        success: true,
        message: format!("File moved from {source} to {destination}"),
        source: source.to_string(),
        destination: destination.to_string(),
    })
}

pub fn rename_file(source: &str, new_name: &str) -> Result<RenameAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source file not found: {source}"),
            source,
        ));
    }
    if src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is a directory, use rename_directory instead: {source}"),
            source,
        ));
    }

    let destination = src.parent().unwrap_or_else(|| Path::new("")).join(new_name);
    let new_path = destination.to_string_lossy().into_owned();
    fs::rename(src, &destination)
        .map_err(|e| FsError::io(format!("Error renaming file {source}"), Some(source), e))?;
    Ok(RenameAck {
        success: true,
        message: format!("File renamed from {source} to {new_path}"),
        old_path: source.to_string(),
        new_path,
    })
}

/// Create the parent directory chain of `path` when one is named and absent.
pub(crate) fn ensure_parent(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                FsError::io(
                    format!("Error creating directory {}", parent.display()),
                    Some(path),
                    e,
                )
            })?;
        }
    }
    Ok(())
}

/// Moving onto an existing directory places the source inside it, keeping
/// its base name.
pub(crate) fn resolve_move_target(source: &str, destination: &str) -> PathBuf {
    let dest = Path::new(destination);
    if dest.is_dir() {
        if let Some(name) = Path::new(source).file_name() {
            return dest.join(name);
        }
    }
    dest.to_path_buf()
}
