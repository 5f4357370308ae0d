//! # Assistant Filesystem Operations
//!
//! The filesystem, archive, and subprocess half of the code assistant tool
//! surface. Every operation here:
//! - Takes paths as plain strings and echoes them back verbatim in messages
//! - Returns a typed success record from [`assistant_protocol::types`]
//! - Fails with an [`FsError`] whose [`FsError::kind`] maps onto the wire
//!   taxonomy, so the server can build a uniform error envelope
//! - Runs to completion synchronously; there is no cancellation and no
//!   shared state beyond the filesystem itself
//!
//! Batch-style operations (listing, searching) skip unreadable entries with
//! a logged warning instead of failing the whole call.

mod archive;
mod dirs;
mod error;
mod exec;
mod files;
mod info;
mod listing;
mod readme;
mod search;
mod tempfs;
mod tree;

pub use archive::{unzip_file, zip_directory};
pub use dirs::{
    copy_directory, create_directory, delete_directory, move_directory, rename_directory,
};
pub use error::{FsError, Result};
pub use exec::{lint_code, run_tests};
pub use files::{
    copy_file, create_file, delete_file, move_file, read_file, rename_file, update_file,
};
pub use info::file_info;
pub use listing::{find_files, list_files};
pub use readme::update_readme;
pub use search::search_in_files;
pub use tempfs::{create_temp_directory, create_temp_file};
pub use tree::project_tree;
