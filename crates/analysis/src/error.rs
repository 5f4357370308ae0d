use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while analyzing source text
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The source text is not syntactically valid
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The file is not written in a supported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No declaration matched the docstring target query
    #[error("No suitable target found for docstring generation")]
    NoTarget,

    /// Several declarations share the requested name
    #[error("Ambiguous target '{name}': declarations at lines {lines:?}")]
    AmbiguousTarget { name: String, lines: Vec<usize> },
}

impl AnalysisError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }
}
