use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid length: expected {expected} got {got}")]
    BytesLength { expected: usize, got: usize },

    #[error("point decompression failed")]
    PointDecompression,

    #[error("scalar is not canonically encoded")]
    ScalarFormat,

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("proof verification failed")]
    Verification,

    #[error("length mismatch: {blinded} blinded tokens, {signed} signed tokens")]
    LengthMismatch { blinded: usize, signed: usize },

    #[error("batch is empty")]
    EmptyBatch,

    #[error("invalid MAC key")]
    MacKey,
}
