use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod types;

/// Closed set of failure kinds carried by every error reply.
///
/// Tool callers branch on the kind, never on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    WrongKind,
    ParseError,
    IoFailure,
    Ambiguous,
    NoOp,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::WrongKind => "wrong_kind",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::IoFailure => "io_failure",
            ErrorKind::Ambiguous => "ambiguous",
            ErrorKind::NoOp => "no_op",
        }
    }
}

/// Uniform failure reply. `success` is always false; `path` is attached when
/// the failure concerns one specific filesystem entry or source file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
