/// Proof of possession for an unblinded token without revealing W:
/// vk = SHA-512("hash_derive_key" || t || W), signature = HMAC-SHA512(vk, message)
use std::fmt;

use curve25519_dalek::ristretto::RistrettoPoint;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{check_length, TokenEncoding};
use crate::error::{Result, TokenError};
use crate::tokens::TokenPreimage;

pub const VERIFICATION_KEY_LENGTH: usize = 64;
pub const VERIFICATION_SIGNATURE_LENGTH: usize = 64;

const DERIVE_KEY_LABEL: &[u8] = b"hash_derive_key";

type HmacSha512 = Hmac<Sha512>;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VerificationKey([u8; VERIFICATION_KEY_LENGTH]);

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct VerificationSignature([u8; VERIFICATION_SIGNATURE_LENGTH]);

impl VerificationKey {
    pub(crate) fn derive(t: &TokenPreimage, w: &RistrettoPoint) -> Self {
        let digest = Sha512::new()
            .chain_update(DERIVE_KEY_LABEL)
            .chain_update(t.as_bytes())
            .chain_update(w.compress().as_bytes())
            .finalize();
        let mut key = [0u8; VERIFICATION_KEY_LENGTH];
        key.copy_from_slice(&digest);
        Self(key)
    }

    pub fn sign(&self, message: &[u8]) -> Result<VerificationSignature> {
        let mut mac = HmacSha512::new_from_slice(&self.0).map_err(|_| TokenError::MacKey)?;
        mac.update(message);
        let tag = mac.finalize().into_bytes();

        let mut signature = [0u8; VERIFICATION_SIGNATURE_LENGTH];
        signature.copy_from_slice(&tag);
        Ok(VerificationSignature(signature))
    }

    /// Constant-time comparison against a freshly computed signature
    pub fn verify(&self, signature: &VerificationSignature, message: &[u8]) -> Result<bool> {
        let expected = self.sign(message)?;
        Ok(expected.0[..].ct_eq(&signature.0[..]).into())
    }
}

impl TokenEncoding for VerificationKey {
    const ENCODED_LENGTH: usize = VERIFICATION_KEY_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let mut key = [0u8; VERIFICATION_KEY_LENGTH];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationKey(..)")
    }
}

impl TokenEncoding for VerificationSignature {
    const ENCODED_LENGTH: usize = VERIFICATION_SIGNATURE_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let mut signature = [0u8; VERIFICATION_SIGNATURE_LENGTH];
        signature.copy_from_slice(bytes);
        Ok(Self(signature))
    }
}

impl fmt::Debug for VerificationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationSignature({})", self.encode_base64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SigningKey, Token};
    use rand_core::OsRng;

    fn unblinded_verification_key() -> VerificationKey {
        let signing_key = SigningKey::random(&mut OsRng);
        let token = Token::random(&mut OsRng);
        let signed = signing_key.sign(&token.blind());
        token.unblind(&signed).derive_verification_key()
    }

    #[test]
    fn test_sign_verify() {
        let key = unblinded_verification_key();
        let signature = key.sign(b"confirmation payload").unwrap();

        assert!(key.verify(&signature, b"confirmation payload").unwrap());
        assert!(!key.verify(&signature, b"tampered payload").unwrap());
    }

    #[test]
    fn test_signature_bound_to_key() {
        let key_a = unblinded_verification_key();
        let key_b = unblinded_verification_key();
        let signature = key_a.sign(b"message").unwrap();
        assert!(!key_b.verify(&signature, b"message").unwrap());
    }

    #[test]
    fn test_same_token_derives_same_key() {
        let signing_key = SigningKey::random(&mut OsRng);
        let token = Token::random(&mut OsRng);
        let signed = signing_key.sign(&token.blind());

        let first = token.unblind(&signed).derive_verification_key();
        let second = token.unblind(&signed).derive_verification_key();
        assert_eq!(first.to_bytes(), second.to_bytes());
    }
}
