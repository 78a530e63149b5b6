//! Challenge Bypass tokens over Ristretto255.
//!
//! Blind signing with batch DLEQ proofs, as used by Privacy Pass style issuers:
//!
//! ```rust
//! use cbr::{BatchDLEQProof, SigningKey, Token};
//! use rand_core::OsRng;
//!
//! let signing_key = SigningKey::random(&mut OsRng);
//! let tokens: Vec<Token> = (0..3).map(|_| Token::random(&mut OsRng)).collect();
//! let blinded: Vec<_> = tokens.iter().map(Token::blind).collect();
//!
//! // Issuer side
//! let signed: Vec<_> = blinded.iter().map(|b| signing_key.sign(b)).collect();
//! let proof = BatchDLEQProof::new(&mut OsRng, &blinded, &signed, &signing_key).unwrap();
//!
//! // Client side
//! let unblinded = proof
//!     .verify_and_unblind(&tokens, &blinded, &signed, signing_key.public_key())
//!     .unwrap();
//! assert_eq!(unblinded.len(), 3);
//! ```

pub mod dleq;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod tokens;
pub mod verification;

pub use dleq::{BatchDLEQProof, DLEQProof};
pub use encoding::TokenEncoding;
pub use error::{Result, TokenError};
pub use keys::{PublicKey, SigningKey};
pub use tokens::{BlindedToken, SignedToken, Token, TokenPreimage, UnblindedToken};
pub use verification::{VerificationKey, VerificationSignature};
