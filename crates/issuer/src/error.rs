use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IssuerError>;

#[derive(Error, Debug)]
pub enum IssuerError {
    #[error("Empty batch")]
    EmptyBatch,

    #[error("Batch too large: {got} tokens (max {max})")]
    BatchTooLarge { max: usize, got: usize },

    #[error("Invalid blinded token at index {0}")]
    InvalidBlindedToken(usize),

    #[error("Key store error: {0}")]
    KeyStore(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl IntoResponse for IssuerError {
    fn into_response(self) -> Response {
        let status = match &self {
            IssuerError::EmptyBatch
            | IssuerError::BatchTooLarge { .. }
            | IssuerError::InvalidBlindedToken(_) => StatusCode::BAD_REQUEST,
            IssuerError::KeyStore(_) | IssuerError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
