use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error(
        "No file markers found. Each file must start with a line like `=== File: path/to/file.ext ===`"
    )]
    NoMarkersFound,
}
