use std::fmt;

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::Scalar;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{decode_nonzero_scalar, decode_point, TokenEncoding};
use crate::error::Result;
use crate::tokens::{BlindedToken, SignedToken};

pub const SIGNING_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Issuer secret k. Only the scalar is encoded; the public key is recomputed on decode.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey {
    k: Scalar,
    #[zeroize(skip)]
    public_key: PublicKey,
}

/// K = k * G
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(pub(crate) RistrettoPoint);

impl SigningKey {
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut k = Scalar::random(rng);
        while k == Scalar::ZERO {
            k = Scalar::random(rng);
        }
        Self::from_scalar(k)
    }

    fn from_scalar(k: Scalar) -> Self {
        let public_key = PublicKey(RistrettoPoint::mul_base(&k));
        Self { k, public_key }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Q = k * P
    pub fn sign(&self, blinded_token: &BlindedToken) -> SignedToken {
        SignedToken(self.sign_point(&blinded_token.0))
    }

    pub(crate) fn sign_point(&self, point: &RistrettoPoint) -> RistrettoPoint {
        point * self.k
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.k
    }
}

impl TokenEncoding for SigningKey {
    const ENCODED_LENGTH: usize = SIGNING_KEY_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.k.as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_nonzero_scalar(bytes).map(Self::from_scalar)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl TokenEncoding for PublicKey {
    const ENCODED_LENGTH: usize = PUBLIC_KEY_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.compress().to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_point(bytes).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn test_signing_key_roundtrip_restores_public_key() {
        let signing_key = SigningKey::random(&mut OsRng);
        let decoded = SigningKey::decode_base64(&signing_key.encode_base64()).unwrap();
        assert_eq!(decoded.public_key(), signing_key.public_key());
    }

    #[test]
    fn test_distinct_keys_sign_differently() {
        let key_a = SigningKey::random(&mut OsRng);
        let key_b = SigningKey::random(&mut OsRng);
        let blinded = crate::Token::random(&mut OsRng).blind();
        assert_ne!(key_a.sign(&blinded), key_b.sign(&blinded));
    }

    #[test]
    fn test_debug_does_not_leak_scalar() {
        let signing_key = SigningKey::random(&mut OsRng);
        let debug = format!("{:?}", signing_key);
        assert!(!debug.contains(&signing_key.encode_base64()));
    }
}
