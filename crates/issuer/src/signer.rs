/// Signs blinded tokens without learning the token preimages.
/// The signing key is persisted as base64 so tokens issued before a restart
/// still verify against the published public key.
use std::path::Path;

use rewards_sdk::privacy::{
    BatchDLEQProof, BlindedToken, PublicKey, SignedToken, SignedTokensResponse, SigningKey,
};
use tracing::{info, warn};

use crate::error::{IssuerError, Result};

/// Output of one signing request, in request order
pub struct SignedBatch {
    pub public_key: PublicKey,
    pub signed_tokens: Vec<SignedToken>,
    pub batch_proof: BatchDLEQProof,
}

impl SignedBatch {
    pub fn to_response(&self) -> Result<SignedTokensResponse> {
        SignedTokensResponse::new(&self.public_key, &self.signed_tokens, &self.batch_proof)
            .ok_or_else(|| IssuerError::Crypto("Failed to encode signed batch".into()))
    }
}

pub struct TokenSigner {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl TokenSigner {
    pub fn new_or_load(key_path: &Path) -> Result<Self> {
        if key_path.exists() {
            match Self::load_from_file(key_path) {
                Ok(signer) => {
                    info!("Loaded signing key from {}", key_path.display());
                    return Ok(signer);
                }
                Err(e) => {
                    warn!("Failed to load signing key from {}: {}", key_path.display(), e);
                    warn!("Generating new signing key (previously issued tokens will not verify!)");
                }
            }
        }

        let signer = Self::new();
        if let Err(e) = signer.save_to_file(key_path) {
            warn!("Failed to save signing key to {}: {}", key_path.display(), e);
        } else {
            info!("Saved signing key to {}", key_path.display());
        }

        Ok(signer)
    }

    pub fn new() -> Self {
        let signer = Self::from_signing_key(SigningKey::random());
        info!("Generated Ristretto signing key");
        signer
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = signing_key.public_key();
        Self {
            signing_key,
            public_key,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let encoded = std::fs::read_to_string(path)
            .map_err(|e| IssuerError::KeyStore(format!("Failed to read key file: {}", e)))?;
        Self::from_base64(encoded.trim())
    }

    fn save_to_file(&self, path: &Path) -> Result<()> {
        let encoded = self
            .signing_key
            .encode_base64()
            .ok_or_else(|| IssuerError::KeyStore("Signing key has no value".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| IssuerError::KeyStore(format!("Failed to create key dir: {}", e)))?;
        }
        std::fs::write(path, encoded)
            .map_err(|e| IssuerError::KeyStore(format!("Failed to write key file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| IssuerError::KeyStore(format!("Failed to restrict key file: {}", e)))?;
        }

        Ok(())
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let signing_key = SigningKey::decode_base64(encoded);
        if !signing_key.has_value() {
            return Err(IssuerError::KeyStore("Invalid signing key".into()));
        }
        Ok(Self::from_signing_key(signing_key))
    }

    #[allow(dead_code)]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn public_key_base64(&self) -> Result<String> {
        self.public_key
            .encode_base64()
            .ok_or_else(|| IssuerError::Crypto("Public key has no value".into()))
    }

    pub fn sign_batch(&self, blinded_tokens: &[BlindedToken]) -> Result<SignedBatch> {
        if blinded_tokens.is_empty() {
            return Err(IssuerError::EmptyBatch);
        }

        let signed_tokens = blinded_tokens
            .iter()
            .enumerate()
            .map(|(index, blinded_token)| {
                self.signing_key
                    .sign(blinded_token)
                    .ok_or(IssuerError::InvalidBlindedToken(index))
            })
            .collect::<Result<Vec<_>>>()?;

        let batch_proof = BatchDLEQProof::create(blinded_tokens, &signed_tokens, &self.signing_key);
        if !batch_proof.has_value() {
            return Err(IssuerError::Crypto("Failed to create batch DLEQ proof".into()));
        }

        Ok(SignedBatch {
            public_key: self.public_key.clone(),
            signed_tokens,
            batch_proof,
        })
    }
}

impl Default for TokenSigner {
    fn default() -> Self {
        Self::new()
    }
}
