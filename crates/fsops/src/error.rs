use std::io;

use assistant_protocol::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FsError>;

#[derive(Debug, Error)]
pub enum FsError {
    /// A path precondition failed: the subject does not exist.
    #[error("{message}")]
    NotFound { message: String, path: String },

    /// A file stood where a directory was required, or the reverse.
    #[error("{message}")]
    WrongKind { message: String, path: String },

    /// A glob or regex pattern that does not compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// An OS-level call failed mid-operation.
    #[error("{message}: {source}")]
    Io {
        message: String,
        path: Option<String>,
        #[source]
        source: io::Error,
    },

    /// Failure outside the plain OS error space, archive internals and the
    /// like.
    #[error("{0}")]
    OperationFailed(String),
}

impl FsError {
    pub fn not_found(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn wrong_kind(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::WrongKind {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern(message.into())
    }

    pub fn io(message: impl Into<String>, path: Option<&str>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: path.map(str::to_string),
            source,
        }
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed(message.into())
    }

    /// Taxonomy bucket for the wire envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::WrongKind { .. } => ErrorKind::WrongKind,
            Self::InvalidPattern(_) => ErrorKind::ParseError,
            Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorKind::NotFound
            }
            Self::Io { .. } | Self::OperationFailed(_) => ErrorKind::IoFailure,
        }
    }

    /// Path to surface alongside the message, when one is known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotFound { path, .. } | Self::WrongKind { path, .. } => Some(path),
            Self::Io { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}
