
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrellisError {
    #[error("Domain error: {0}")]
    Domain(String),
    #[error("Incompatible bitsets: {0}")]
    Compatibility(String),
    #[error("Size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Empty domain")]
    EmptyDomain,
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Input error: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, TrellisError>;

// Helper conversions
impl From<std::io::Error> for TrellisError {
    fn from(e: std::io::Error) -> Self { Self::Input(e.to_string()) }
}
