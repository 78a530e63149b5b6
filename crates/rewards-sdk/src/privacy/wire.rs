/// Issuer response format:
/// {
///   "publicKey": "<base64>",
///   "signedTokens": ["<base64>", ...],
///   "batchProof": "<base64>"
/// }
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use super::tokens::{BatchDLEQProof, BlindedToken, PublicKey, SignedToken, Token, UnblindedToken};

pub const PUBLIC_KEY_KEY: &str = "publicKey";
pub const SIGNED_TOKENS_KEY: &str = "signedTokens";
pub const BATCH_PROOF_KEY: &str = "batchProof";

/// Typed form of the issuer response, for producers of the wire format
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTokensResponse {
    pub public_key: String,
    pub signed_tokens: Vec<String>,
    pub batch_proof: String,
}

impl SignedTokensResponse {
    pub fn new(
        public_key: &PublicKey,
        signed_tokens: &[SignedToken],
        batch_proof: &BatchDLEQProof,
    ) -> Option<Self> {
        let signed_tokens = signed_tokens
            .iter()
            .map(SignedToken::encode_base64)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            public_key: public_key.encode_base64()?,
            signed_tokens,
            batch_proof: batch_proof.encode_base64()?,
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            PUBLIC_KEY_KEY: self.public_key,
            SIGNED_TOKENS_KEY: self.signed_tokens,
            BATCH_PROOF_KEY: self.batch_proof,
        })
    }
}

pub fn parse_public_key(dict: &Value) -> Option<PublicKey> {
    let public_key_base64 = dict.get(PUBLIC_KEY_KEY)?.as_str()?;

    let public_key = PublicKey::decode_base64(public_key_base64);
    public_key.has_value().then_some(public_key)
}

/// Fails the whole list on the first element that is not a valid base64 token
pub fn parse_signed_tokens(dict: &Value) -> Option<Vec<SignedToken>> {
    let list = dict.get(SIGNED_TOKENS_KEY)?.as_array()?;

    let mut signed_tokens = Vec::with_capacity(list.len());
    for item in list {
        let signed_token = SignedToken::decode_base64(item.as_str()?);
        if !signed_token.has_value() {
            return None;
        }
        signed_tokens.push(signed_token);
    }

    Some(signed_tokens)
}

pub fn parse_batch_dleq_proof(dict: &Value) -> Option<BatchDLEQProof> {
    let batch_proof_base64 = dict.get(BATCH_PROOF_KEY)?.as_str()?;

    let batch_dleq_proof = BatchDLEQProof::decode_base64(batch_proof_base64);
    batch_dleq_proof.has_value().then_some(batch_dleq_proof)
}

/// Entry point for an issuer response: `tokens` and `blinded_tokens` are the
/// lists the request was built from, in request order.
pub fn parse_verify_and_unblind_tokens(
    dict: &Value,
    tokens: &[Token],
    blinded_tokens: &[BlindedToken],
    public_key: &PublicKey,
) -> Option<Vec<UnblindedToken>> {
    if !public_key.has_value() {
        error!("Invalid public key");
        return None;
    }

    let Some(batch_dleq_proof) = parse_batch_dleq_proof(dict) else {
        error!("Failed to parse batch DLEQ proof");
        return None;
    };

    let Some(signed_tokens) = parse_signed_tokens(dict) else {
        error!("Failed to parse signed tokens");
        return None;
    };

    let unblinded_tokens =
        batch_dleq_proof.verify_and_unblind(tokens, blinded_tokens, &signed_tokens, public_key);
    if unblinded_tokens.is_none() {
        warn!("Failed to verify and unblind tokens");
    }

    unblinded_tokens
}
