/// Chaum-Pedersen proofs that a batch was signed with the advertised key.
/// Single proof: log_G(K) == log_P(Q).
/// Batch proof: the same statement over M = sum(c_i * P_i), Z = sum(c_i * Q_i),
/// with c_i derived from a hash of the whole batch.
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::Scalar;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha512};

use crate::encoding::{check_length, decode_scalar, TokenEncoding};
use crate::error::{Result, TokenError};
use crate::keys::{PublicKey, SigningKey};
use crate::tokens::{BlindedToken, SignedToken, Token, UnblindedToken};

pub const DLEQ_PROOF_LENGTH: usize = 64;

const DLEQ_LABEL: &[u8] = b"cbr-dleq-proof-v1";
const BATCH_LABEL: &[u8] = b"cbr-batch-dleq-composite-v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLEQProof {
    c: Scalar,
    s: Scalar,
}

impl DLEQProof {
    pub fn new<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        blinded_token: &BlindedToken,
        signed_token: &SignedToken,
        signing_key: &SigningKey,
    ) -> Self {
        Self::prove(rng, &blinded_token.0, &signed_token.0, signing_key)
    }

    pub fn verify(
        &self,
        blinded_token: &BlindedToken,
        signed_token: &SignedToken,
        public_key: &PublicKey,
    ) -> Result<()> {
        self.check(&blinded_token.0, &signed_token.0, public_key)
    }

    fn prove<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        p: &RistrettoPoint,
        q: &RistrettoPoint,
        signing_key: &SigningKey,
    ) -> Self {
        let t = Scalar::random(rng);
        let a = RistrettoPoint::mul_base(&t);
        let b = p * t;

        let c = challenge(&signing_key.public_key().0, p, q, &a, &b);
        let s = t - c * signing_key.scalar();

        Self { c, s }
    }

    fn check(&self, p: &RistrettoPoint, q: &RistrettoPoint, public_key: &PublicKey) -> Result<()> {
        // A = s*G + c*K, B = s*P + c*Q
        let a = RistrettoPoint::mul_base(&self.s) + public_key.0 * self.c;
        let b = p * self.s + q * self.c;

        if challenge(&public_key.0, p, q, &a, &b) == self.c {
            Ok(())
        } else {
            Err(TokenError::Verification)
        }
    }
}

fn challenge(
    k: &RistrettoPoint,
    p: &RistrettoPoint,
    q: &RistrettoPoint,
    a: &RistrettoPoint,
    b: &RistrettoPoint,
) -> Scalar {
    let mut hasher = Sha512::new();
    hasher.update(DLEQ_LABEL);
    for point in [&RISTRETTO_BASEPOINT_POINT, k, p, q, a, b] {
        hasher.update(point.compress().as_bytes());
    }
    Scalar::from_hash(hasher)
}

impl TokenEncoding for DLEQProof {
    const ENCODED_LENGTH: usize = DLEQ_PROOF_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(DLEQ_PROOF_LENGTH);
        bytes.extend_from_slice(self.c.as_bytes());
        bytes.extend_from_slice(self.s.as_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, Self::ENCODED_LENGTH)?;
        let c = decode_scalar(&bytes[..32])?;
        let s = decode_scalar(&bytes[32..])?;
        Ok(Self { c, s })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchDLEQProof(DLEQProof);

impl BatchDLEQProof {
    pub fn new<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        signing_key: &SigningKey,
    ) -> Result<Self> {
        let (m, z) = composites(blinded_tokens, signed_tokens, signing_key.public_key())?;
        Ok(Self(DLEQProof::prove(rng, &m, &z, signing_key)))
    }

    pub fn verify(
        &self,
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        public_key: &PublicKey,
    ) -> Result<()> {
        let (m, z) = composites(blinded_tokens, signed_tokens, public_key)?;
        self.0.check(&m, &z, public_key)
    }

    /// Verifies the batch, then unblinds `tokens` against `signed_tokens` pairwise.
    ///
    /// Pairing zips the two lists, so a `tokens` list shorter than the batch
    /// yields a shorter result rather than an error. Callers that need a 1:1
    /// result must compare lengths themselves.
    pub fn verify_and_unblind<'a, I>(
        &self,
        tokens: I,
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        public_key: &PublicKey,
    ) -> Result<Vec<UnblindedToken>>
    where
        I: IntoIterator<Item = &'a Token>,
    {
        self.verify(blinded_tokens, signed_tokens, public_key)?;

        Ok(tokens
            .into_iter()
            .zip(signed_tokens)
            .map(|(token, signed_token)| token.unblind(signed_token))
            .collect())
    }
}

fn composites(
    blinded_tokens: &[BlindedToken],
    signed_tokens: &[SignedToken],
    public_key: &PublicKey,
) -> Result<(RistrettoPoint, RistrettoPoint)> {
    if blinded_tokens.len() != signed_tokens.len() {
        return Err(TokenError::LengthMismatch {
            blinded: blinded_tokens.len(),
            signed: signed_tokens.len(),
        });
    }
    if blinded_tokens.is_empty() {
        return Err(TokenError::EmptyBatch);
    }

    let mut hasher = Sha512::new();
    hasher.update(BATCH_LABEL);
    hasher.update(RISTRETTO_BASEPOINT_POINT.compress().as_bytes());
    hasher.update(public_key.0.compress().as_bytes());
    for blinded_token in blinded_tokens {
        hasher.update(blinded_token.0.compress().as_bytes());
    }
    for signed_token in signed_tokens {
        hasher.update(signed_token.0.compress().as_bytes());
    }
    let seed = hasher.finalize();

    let weights: Vec<Scalar> = (0..blinded_tokens.len() as u64)
        .map(|i| {
            Scalar::from_hash(
                Sha512::new()
                    .chain_update(seed.as_slice())
                    .chain_update(i.to_le_bytes()),
            )
        })
        .collect();

    let m: RistrettoPoint = weights
        .iter()
        .zip(blinded_tokens)
        .map(|(c, blinded_token)| blinded_token.0 * c)
        .sum();
    let z: RistrettoPoint = weights
        .iter()
        .zip(signed_tokens)
        .map(|(c, signed_token)| signed_token.0 * c)
        .sum();

    Ok((m, z))
}

impl TokenEncoding for BatchDLEQProof {
    const ENCODED_LENGTH: usize = DLEQ_PROOF_LENGTH;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        DLEQProof::from_bytes(bytes).map(Self)
    }
}
