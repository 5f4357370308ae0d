//! Stat-style metadata for one path.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use assistant_protocol::types::{FileInfo, FileInfoResult};

use crate::error::{FsError, Result};

pub fn file_info(path: &str) -> Result<FileInfoResult> {
    let subject = Path::new(path);
    if !subject.exists() {
        return Err(FsError::not_found(format!("File not found: {path}"), path));
    }

    let metadata = fs::metadata(subject)
        .map_err(|e| FsError::io(format!("Error getting file info for {path}"), Some(path), e))?;

    let last_modified = metadata
        .modified()
        .ok()
        .and_then(epoch_seconds)
        .unwrap_or(0.0);
    // Creation time is not available on every filesystem; fall back to the
    // modification time rather than fail the whole call.
    let created = metadata
        .created()
        .ok()
        .and_then(epoch_seconds)
        .unwrap_or(last_modified);

    let is_directory = metadata.is_dir();
    let extension = if is_directory {
        None
    } else {
        Some(
            subject
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
        )
    };

    Ok(FileInfoResult {
        success: true,
        info: FileInfo {
            path: path.to_string(),
            size: metadata.len(),
            last_modified,
            created,
            is_directory,
            permissions: permission_bits(&metadata),
            exists: true,
            extension,
        },
    })
}

fn epoch_seconds(time: SystemTime) -> Option<f64> {
    time.duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs_f64())
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:03o}", metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(metadata: &fs::Metadata) -> String {
    if metadata.permissions().readonly() {
        "444".to_string()
    } else {
        "666".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::create_file;
    use assistant_protocol::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn files_report_size_extension_and_kind() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("script.py");
        create_file(&file.to_string_lossy(), "x = 1\n").unwrap();

        let info = file_info(&file.to_string_lossy()).unwrap().info;
        assert!(!info.is_directory);
        assert!(info.exists);
        assert_eq!(info.size, 6);
        assert_eq!(info.extension.as_deref(), Some(".py"));
        assert_eq!(info.permissions.len(), 3);
        assert!(info.last_modified > 0.0);
    }

    #[test]
    fn extensionless_files_report_an_empty_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Makefile");
        create_file(&file.to_string_lossy(), "all:\n").unwrap();

        let info = file_info(&file.to_string_lossy()).unwrap().info;
        assert_eq!(info.extension.as_deref(), Some(""));
    }

    #[test]
    fn directories_have_no_extension_field() {
        let dir = tempfile::tempdir().unwrap();

        let info = file_info(&dir.path().to_string_lossy()).unwrap().info;
        assert!(info.is_directory);
        assert_eq!(info.extension, None);
    }

    #[test]
    fn missing_paths_are_not_found() {
        let err = file_info("/no/such/entry").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "File not found: /no/such/entry");
    }
}
