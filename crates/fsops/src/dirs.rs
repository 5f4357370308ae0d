//! Directory operations: create, delete, copy, move, rename.

use std::fs;
use std::path::Path;

use assistant_protocol::types::{OpAck, PathAck, RenameAck, TransferAck};

use crate::error::{FsError, Result};
use crate::files::{ensure_parent, resolve_move_target};

pub fn create_directory(path: &str) -> Result<PathAck> {
    fs::create_dir_all(path)
        .map_err(|e| FsError::io(format!("Error creating directory {path}"), Some(path), e))?;
    Ok(PathAck {
        success: true,
        message: format!("Directory created at {path}"),
        path: path.to_string(),
    })
}

/// Delete a directory. The non-recursive form requires it to be empty.
pub fn delete_directory(path: &str, recursive: bool) -> Result<OpAck> {
    let subject = Path::new(path);
    if !subject.exists() {
        return Err(FsError::not_found(
            format!("Directory not found: {path}"),
            path,
        ));
    }
    if !subject.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Path is not a directory: {path}"),
            path,
        ));
    }

    let removal = if recursive {
        fs::remove_dir_all(subject)
    } else {
        fs::remove_dir(subject)
    };
    removal.map_err(|e| FsError::io(format!("Error deleting directory {path}"), Some(path), e))?;
    Ok(OpAck {
        success: true,
        message: format!("Directory deleted: {path}"),
    })
}

pub fn copy_directory(source: &str, destination: &str) -> Result<TransferAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source directory not found: {source}"),
            source,
        ));
    }
    if !src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is not a directory: {source}"),
            source,
        ));
    }

    let dest = Path::new(destination);
    if dest.exists() {
        return Err(FsError::operation_failed(format!(
            "Error copying directory {source}: destination already exists: {destination}"
        )));
    }
    ensure_parent(destination)?;
    copy_dir_recursive(src, dest, source)?;
    Ok(TransferAck {
        success: true,
        message: format!("Directory copied from {source} to {destination}"),
        source: source.to_string(),
        destination: destination.to_string(),
    })
}

pub fn move_directory(source: &str, destination: &str) -> Result<TransferAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source directory not found: {source}"),
            source,
        ));
    }
    if !src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is not a directory: {source}"),
            source,
        ));
    }

    ensure_parent(destination)?;
    let target = resolve_move_target(source, destination);
    fs::rename(src, &target)
        .map_err(|e| FsError::io(format!("Error moving directory {source}"), Some(source), e))?;
    Ok(TransferAck {
        success: true,
        message: format!("Directory moved from {source} to {destination}"),
        source: source.to_string(),
        destination: destination.to_string(),
    })
}

pub fn rename_directory(source: &str, new_name: &str) -> Result<RenameAck> {
    let src = Path::new(source);
    if !src.exists() {
        return Err(FsError::not_found(
            format!("Source directory not found: {source}"),
            source,
        ));
    }
    if !src.is_dir() {
        return Err(FsError::wrong_kind(
            format!("Source is not a directory: {source}"),
            source,
        ));
    }

    let destination = src.parent().unwrap_or_else(|| Path::new("")).join(new_name);
    let new_path = destination.to_string_lossy().into_owned();
    fs::rename(src, &destination)
        .map_err(|e| FsError::io(format!("Error renaming directory {source}"), Some(source), e))?;
    Ok(RenameAck {
        success: true,
        message: format!("Directory renamed from {source} to {new_path}"),
        old_path: source.to_string(),
        new_path,
    })
}

fn copy_dir_recursive(src: &Path, dest: &Path, origin: &str) -> Result<()> {
    let context = || format!("Error copying directory {origin}");
    fs::create_dir_all(dest).map_err(|e| FsError::io(context(), None, e))?;

    let entries = fs::read_dir(src).map_err(|e| FsError::io(context(), None, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(context(), None, e))?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| FsError::io(context(), None, e))?;
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target, origin)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| FsError::io(context(), None, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{create_file, read_file};
    use assistant_protocol::ErrorKind;
    use pretty_assertions::assert_eq;

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn create_is_idempotent_and_makes_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = path_str(&dir.path().join("a/b/c"));

        let first = create_directory(&nested).unwrap();
        assert_eq!(first.message, format!("Directory created at {nested}"));
        assert!(Path::new(&nested).is_dir());

        // already-existing directories are not an error
        assert!(create_directory(&nested).unwrap().success);
    }

    #[test]
    fn non_recursive_delete_requires_empty() {
        let dir = tempfile::tempdir().unwrap();
        let target = path_str(&dir.path().join("full"));
        create_file(&format!("{target}/inner.txt"), "x").unwrap();

        let err = delete_directory(&target, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        delete_directory(&target, true).unwrap();
        assert!(!Path::new(&target).exists());
    }

    #[test]
    fn delete_refuses_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = path_str(&dir.path().join("f.txt"));
        create_file(&file, "x").unwrap();

        let err = delete_directory(&file, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongKind);
        assert_eq!(err.to_string(), format!("Path is not a directory: {file}"));

        let missing = path_str(&dir.path().join("absent"));
        assert_eq!(
            delete_directory(&missing, true).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn copy_replicates_nested_content() {
        let dir = tempfile::tempdir().unwrap();
        let src = path_str(&dir.path().join("proj"));
        let dest = path_str(&dir.path().join("backup/proj"));
        create_file(&format!("{src}/a.txt"), "A").unwrap();
        create_file(&format!("{src}/sub/b.txt"), "B").unwrap();

        let ack = copy_directory(&src, &dest).unwrap();
        assert_eq!(ack.message, format!("Directory copied from {src} to {dest}"));
        assert_eq!(read_file(&format!("{dest}/a.txt")).unwrap().content, "A");
        assert_eq!(read_file(&format!("{dest}/sub/b.txt")).unwrap().content, "B");
        assert!(Path::new(&src).is_dir());
    }

    #[test]
    fn copy_refuses_an_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = path_str(&dir.path().join("proj"));
        let dest = path_str(&dir.path().join("existing"));
        create_directory(&src).unwrap();
        create_directory(&dest).unwrap();

        let err = copy_directory(&src, &dest).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.to_string().contains("destination already exists"));
    }

    #[test]
    fn move_nests_into_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = path_str(&dir.path().join("payload"));
        let dest = path_str(&dir.path().join("holder"));
        create_file(&format!("{src}/f.txt"), "x").unwrap();
        create_directory(&dest).unwrap();

        move_directory(&src, &dest).unwrap();
        assert!(!Path::new(&src).exists());
        assert!(dir.path().join("holder/payload/f.txt").is_file());
    }

    #[test]
    fn rename_stays_in_the_parent() {
        let dir = tempfile::tempdir().unwrap();
        let src = path_str(&dir.path().join("before"));
        create_directory(&src).unwrap();

        let ack = rename_directory(&src, "after").unwrap();
        let expected = path_str(&dir.path().join("after"));
        assert_eq!(ack.new_path, expected);
        assert!(Path::new(&expected).is_dir());
        assert!(!Path::new(&src).exists());
    }
}
