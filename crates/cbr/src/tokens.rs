/// Client-side token lifecycle:
/// 1. Client picks a random preimage t and blinding scalar r (`Token`)
/// 2. Client sends P = r * H(t) (`BlindedToken`)
/// 3. Issuer returns Q = k * P (`SignedToken`)
/// 4. Client computes W = r^-1 * Q = k * H(t) (`UnblindedToken`)
use std::fmt;

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::Scalar;
use rand_core::CryptoRngCore;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{check_length, decode_nonzero_scalar, decode_point, TokenEncoding};
use crate::error::Result;
use crate::verification::VerificationKey;

pub const TOKEN_PREIMAGE_LENGTH: usize = 64;
pub const TOKEN_LENGTH: usize = TOKEN_PREIMAGE_LENGTH + 32;
pub const BLINDED_TOKEN_LENGTH: usize = 32;
pub const SIGNED_TOKEN_LENGTH: usize = 32;
pub const UNBLINDED_TOKEN_LENGTH: usize = TOKEN_PREIMAGE_LENGTH + 32;

/// The random value a token is issued for; revealed when the token is redeemed
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct TokenPreimage([u8; TOKEN_PREIMAGE_LENGTH]);

impl TokenPreimage {
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; TOKEN_PREIMAGE_LENGTH];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// H(t), the point the issuer ends up signing
    pub(crate) fn point(&self) -> RistrettoPoint {
        RistrettoPoint::hash_from_bytes::<Sha512>(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_PREIMAGE_LENGTH] {
        &self.0
    }
}

impl TokenEncoding for TokenPreimage {
    const ENCODED_LENGTH: usize = TOKEN_PREIMAGE_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let mut arr = [0u8; TOKEN_PREIMAGE_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for TokenPreimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPreimage(..)")
    }
}

/// Preimage plus the blinding scalar. Never leaves the client.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Token {
    t: TokenPreimage,
    r: Scalar,
}

impl Token {
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let t = TokenPreimage::random(rng);
        let mut r = Scalar::random(rng);
        while r == Scalar::ZERO {
            r = Scalar::random(rng);
        }
        Self { t, r }
    }

    pub fn preimage(&self) -> TokenPreimage {
        self.t.clone()
    }

    pub fn blind(&self) -> BlindedToken {
        BlindedToken(self.t.point() * self.r)
    }

    /// W = r^-1 * Q
    pub(crate) fn unblind(&self, signed_token: &SignedToken) -> UnblindedToken {
        UnblindedToken {
            t: self.t.clone(),
            w: signed_token.0 * self.r.invert(),
        }
    }
}

impl TokenEncoding for Token {
    const ENCODED_LENGTH: usize = TOKEN_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(TOKEN_LENGTH);
        bytes.extend_from_slice(self.t.as_bytes());
        bytes.extend_from_slice(self.r.as_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let t = TokenPreimage::from_bytes(&bytes[..TOKEN_PREIMAGE_LENGTH])?;
        let r = decode_nonzero_scalar(&bytes[TOKEN_PREIMAGE_LENGTH..])?;
        Ok(Self { t, r })
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// P = r * H(t)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlindedToken(pub(crate) RistrettoPoint);

impl TokenEncoding for BlindedToken {
    const ENCODED_LENGTH: usize = BLINDED_TOKEN_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.compress().to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_point(bytes).map(Self)
    }
}

/// Q = k * P
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedToken(pub(crate) RistrettoPoint);

impl TokenEncoding for SignedToken {
    const ENCODED_LENGTH: usize = SIGNED_TOKEN_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.compress().to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_point(bytes).map(Self)
    }
}

/// (t, W) where W = k * H(t)
#[derive(Clone, PartialEq, Eq)]
pub struct UnblindedToken {
    t: TokenPreimage,
    w: RistrettoPoint,
}

impl UnblindedToken {
    pub fn preimage(&self) -> TokenPreimage {
        self.t.clone()
    }

    pub fn derive_verification_key(&self) -> VerificationKey {
        VerificationKey::derive(&self.t, &self.w)
    }
}

impl TokenEncoding for UnblindedToken {
    const ENCODED_LENGTH: usize = UNBLINDED_TOKEN_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(UNBLINDED_TOKEN_LENGTH);
        bytes.extend_from_slice(self.t.as_bytes());
        bytes.extend_from_slice(self.w.compress().as_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let t = TokenPreimage::from_bytes(&bytes[..TOKEN_PREIMAGE_LENGTH])?;
        let w = decode_point(&bytes[TOKEN_PREIMAGE_LENGTH..])?;
        Ok(Self { t, w })
    }
}

impl fmt::Debug for UnblindedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UnblindedToken(..)")
    }
}
