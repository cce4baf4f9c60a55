//! Error types for traitsynth

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// traitsynth errors
///
/// Only input that cannot become a behavior tree is fatal. Structural problems
/// are reported as diagnostics and unknown vocabulary degrades to placeholders,
/// so neither shows up here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tree parse error: {0}")]
    TreeParse(String),

    #[error("Tree root is missing")]
    MissingRoot,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
