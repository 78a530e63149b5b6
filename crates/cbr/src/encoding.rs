/// Fixed-length byte encodings and their base64 form
use base64::{engine::general_purpose::STANDARD, Engine as _};
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::Scalar;

use crate::error::{Result, TokenError};

pub trait TokenEncoding: Sized {
    const ENCODED_LENGTH: usize;

    fn to_bytes(&self) -> Vec<u8>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    fn encode_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    fn decode_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded)?;
        Self::from_bytes(&bytes)
    }
}

pub(crate) fn check_length(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(TokenError::BytesLength {
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

pub(crate) fn decode_point(bytes: &[u8]) -> Result<RistrettoPoint> {
    check_length(bytes, 32)?;
    CompressedRistretto::from_slice(bytes)
        .map_err(|_| TokenError::BytesLength {
            expected: 32,
            got: bytes.len(),
        })?
        .decompress()
        .ok_or(TokenError::PointDecompression)
}

pub(crate) fn decode_scalar(bytes: &[u8]) -> Result<Scalar> {
    check_length(bytes, 32)?;
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    Option::from(Scalar::from_canonical_bytes(arr)).ok_or(TokenError::ScalarFormat)
}

/// Same as `decode_scalar` but rejects zero, for scalars that must be invertible
pub(crate) fn decode_nonzero_scalar(bytes: &[u8]) -> Result<Scalar> {
    let scalar = decode_scalar(bytes)?;
    if scalar == Scalar::ZERO {
        return Err(TokenError::ScalarFormat);
    }
    Ok(scalar)
}
