use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors for snapshot and configuration I/O. Token operations never surface
/// errors: they report absence through `Option` / `bool`.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
