use thiserror::Error;
use treepack_format::FormatError;

#[derive(Error, Debug)]
pub enum TreepackError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard read failed: {0}")]
    ClipboardReadError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Scan failed for {0}: {1}")]
    ScanError(String, String),

    #[error("Unpack failed: {0}")]
    UnpackError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl From<std::io::Error> for TreepackError {
    fn from(err: std::io::Error) -> Self {
        TreepackError::IoError(err.to_string())
    }
}

impl From<glob::PatternError> for TreepackError {
    fn from(err: glob::PatternError) -> Self {
        TreepackError::ConfigError(format!("invalid exclude pattern: {}", err))
    }
}
