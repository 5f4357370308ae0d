//! Whole-directory zip create and extract.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use assistant_protocol::types::{UnzipOutcome, ZipOutcome};

use crate::error::{FsError, Result};

/// Archive `directory` into a zip whose entries are rooted at the
/// directory's own name. Without `output_path` the archive lands next to
/// the directory as `<name>.zip`; an explicit output always gets a `.zip`
/// extension.
pub fn zip_directory(directory: &str, output_path: Option<&str>) -> Result<ZipOutcome> {
    let dir = Path::new(directory);
    if !dir.is_dir() {
        return Err(FsError::not_found(
            format!("Directory not found: {directory}"),
            directory,
        ));
    }

    let base_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.to_string());
    let requested = match output_path {
        Some(path) => PathBuf::from(path),
        None => dir
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(format!("{base_name}.zip")),
    };
    let zip_path = requested.with_extension("zip");

    if let Some(parent) = zip_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                FsError::io(format!("Error zipping directory {directory}"), None, e)
            })?;
        }
    }

    let zip_text = zip_path.to_string_lossy().into_owned();
    let io_err = |e| FsError::io(format!("Error zipping directory {directory}"), None, e);
    let zip_err =
        |e| FsError::operation_failed(format!("Error zipping directory {directory}: {e}"));

    let file = fs::File::create(&zip_path).map_err(io_err)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer
        .add_directory(format!("{base_name}/"), options)
        .map_err(zip_err)?;
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            FsError::operation_failed(format!("Error zipping directory {directory}: {e}"))
        })?;
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let entry_name = format!("{base_name}/{}", relative.to_string_lossy());

        if entry.file_type().is_dir() {
            writer.add_directory(entry_name, options).map_err(zip_err)?;
        } else {
            writer.start_file(entry_name, options).map_err(zip_err)?;
            let mut source = fs::File::open(entry.path()).map_err(io_err)?;
            io::copy(&mut source, &mut writer).map_err(io_err)?;
        }
    }
    writer.finish().map_err(zip_err)?;

    Ok(ZipOutcome {
        success: true,
        message: format!("Directory {directory} zipped to {zip_text}"),
        source_directory: directory.to_string(),
        zip_file: zip_text,
    })
}

/// Extract an archive. Without `extract_to` the contents land next to the
/// zip file.
pub fn unzip_file(zip_path: &str, extract_to: Option<&str>) -> Result<UnzipOutcome> {
    let zip = Path::new(zip_path);
    if !zip.exists() {
        return Err(FsError::not_found(
            format!("Zip file not found: {zip_path}"),
            zip_path,
        ));
    }

    let file = fs::File::open(zip)
        .map_err(|e| FsError::io(format!("Error extracting zip file {zip_path}"), None, e))?;
    let mut archive = ZipArchive::new(file).map_err(|_| {
        FsError::wrong_kind(format!("Not a valid zip file: {zip_path}"), zip_path)
    })?;

    let extract_dir = match extract_to {
        Some(path) => PathBuf::from(path),
        None => {
            let parent = zip.parent().unwrap_or_else(|| Path::new("."));
            if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            }
        }
    };
    fs::create_dir_all(&extract_dir)
        .map_err(|e| FsError::io(format!("Error extracting zip file {zip_path}"), None, e))?;

    archive.extract(&extract_dir).map_err(|e| {
        FsError::operation_failed(format!("Error extracting zip file {zip_path}: {e}"))
    })?;

    let extract_text = extract_dir.to_string_lossy().into_owned();
    let mut extracted_items = Vec::new();
    let entries = fs::read_dir(&extract_dir)
        .map_err(|e| FsError::io(format!("Error extracting zip file {zip_path}"), None, e))?;
    for entry in entries {
        let entry = entry
            .map_err(|e| FsError::io(format!("Error extracting zip file {zip_path}"), None, e))?;
        extracted_items.push(extract_dir.join(entry.file_name()).to_string_lossy().into_owned());
    }
    extracted_items.sort();

    Ok(UnzipOutcome {
        success: true,
        message: format!("Zip file {zip_path} extracted to {extract_text}"),
        zip_file: zip_path.to_string(),
        extract_directory: extract_text,
        extracted_items,
    })
}
