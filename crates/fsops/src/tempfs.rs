//! OS-backed temporary paths. Nothing here is cleaned up automatically;
//! the caller owns the returned paths.

use assistant_protocol::types::PathAck;

use crate::error::{FsError, Result};

pub fn create_temp_directory() -> Result<PathAck> {
    let dir = tempfile::tempdir()
        .map_err(|e| FsError::io("Error creating temporary directory".to_string(), None, e))?;
    let path = dir.keep().to_string_lossy().into_owned();
    Ok(PathAck {
        success: true,
        message: format!("Temporary directory created at {path}"),
        path,
    })
}

pub fn create_temp_file(
    suffix: Option<&str>,
    prefix: Option<&str>,
    directory: Option<&str>,
) -> Result<PathAck> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix.unwrap_or("tmp"));
    if let Some(suffix) = suffix {
        builder.suffix(suffix);
    }

    let file = match directory {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| FsError::io("Error creating temporary file".to_string(), None, e))?;

    let (_, kept) = file
        .keep()
        .map_err(|e| FsError::operation_failed(format!("Error creating temporary file: {e}")))?;
    let path = kept.to_string_lossy().into_owned();
    Ok(PathAck {
        success: true,
        message: format!("Temporary file created at {path}"),
        path,
    })
}
