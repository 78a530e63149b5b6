//! Anonymous confirmation tokens: blinding, issuer responses, redemption.
//!
//! Generated -> Blinded -> (issuer signs) -> verified and unblinded -> redeemed.
//! A batch that fails verification is dropped; tokens are never re-blinded.

pub mod blinding;
pub mod credential;
pub mod pool;
pub mod redemption;
#[cfg(test)]
mod test_helpers;
pub mod tokens;
pub mod wire;

pub use blinding::{blind_tokens, generate_tokens};
pub use credential::{Credential, CredentialBatch};
pub use pool::{TokenPoolEvent, UnblindedTokenPool};
pub use redemption::{build_credential, verify_credential};
pub use tokens::*;
pub use wire::{
    parse_public_key, parse_signed_tokens, parse_verify_and_unblind_tokens, SignedTokensResponse,
};
