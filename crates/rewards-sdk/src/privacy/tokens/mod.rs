/// Optional-valued wrappers around the `cbr` primitives.
///
/// Every wrapper is either decoded from base64 or produced by a protocol
/// operation. Decode failures leave the wrapper without a value and are only
/// logged at debug level; operations check `has_value()` before touching the
/// primitive and report failure as `None` / `false`.
use cbr::TokenEncoding;
use tracing::debug;

macro_rules! optional_value_type {
    (@define $(#[$meta:meta])* $name:ident, $raw:ty, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Default)]
        pub struct $name {
            value: Option<$raw>,
        }

        impl $name {
            /// Empty or malformed input yields an instance without a value.
            pub fn decode_base64(value_base64: &str) -> Self {
                Self {
                    value: $crate::privacy::tokens::decode::<$raw>(value_base64, $label),
                }
            }

            pub(crate) fn from_raw(value: $raw) -> Self {
                Self { value: Some(value) }
            }

            pub fn has_value(&self) -> bool {
                self.value.is_some()
            }

            #[allow(dead_code)]
            pub(crate) fn get(&self) -> Option<&$raw> {
                self.value.as_ref()
            }

            pub fn encode_base64(&self) -> Option<String> {
                self.value
                    .as_ref()
                    .map(cbr::TokenEncoding::encode_base64)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.encode_base64() == other.encode_base64()
            }
        }

        impl Eq for $name {}

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.encode_base64().unwrap_or_default())
            }
        }
    };

    (secret $(#[$meta:meta])* $name:ident, $raw:ty, $label:literal) => {
        optional_value_type!(@define $(#[$meta])* $name, $raw, $label);

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("has_value", &self.has_value())
                    .finish_non_exhaustive()
            }
        }
    };

    ($(#[$meta:meta])* $name:ident, $raw:ty, $label:literal) => {
        optional_value_type!(@define $(#[$meta])* $name, $raw, $label);

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.to_string()).finish()
            }
        }
    };
}

pub(crate) use optional_value_type;

mod batch_dleq_proof;
mod blinded_token;
mod dleq_proof;
mod public_key;
mod signed_token;
mod signing_key;
mod token;
mod token_preimage;
mod unblinded_token;
mod verification_key;
mod verification_signature;

pub use batch_dleq_proof::BatchDLEQProof;
pub use blinded_token::BlindedToken;
pub use dleq_proof::DLEQProof;
pub use public_key::PublicKey;
pub use signed_token::SignedToken;
pub use signing_key::SigningKey;
pub use token::Token;
pub use token_preimage::TokenPreimage;
pub use unblinded_token::UnblindedToken;
pub use verification_key::VerificationKey;
pub use verification_signature::VerificationSignature;

pub(crate) fn decode<T: TokenEncoding>(value_base64: &str, label: &str) -> Option<T> {
    if value_base64.is_empty() {
        debug!("Empty {} value", label);
        return None;
    }

    match T::decode_base64(value_base64) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Failed to decode {}: {}", label, e);
            None
        }
    }
}

/// Unwraps every element or none of them
pub(crate) fn raw_values<'a, W, R: 'a>(
    values: &'a [W],
    get: impl Fn(&'a W) -> Option<&'a R>,
) -> Option<Vec<&'a R>> {
    values.iter().map(get).collect()
}
