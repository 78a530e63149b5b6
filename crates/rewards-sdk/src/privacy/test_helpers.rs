use serde_json::Value;

use super::credential::CredentialBatch;
use super::tokens::{BatchDLEQProof, BlindedToken, SignedToken, SigningKey, UnblindedToken};
use super::wire::SignedTokensResponse;

/// What an honest issuer would answer for `blinded_tokens`
pub(crate) fn issuer_response(signing_key: &SigningKey, blinded_tokens: &[BlindedToken]) -> Value {
    let signed_tokens: Vec<SignedToken> = blinded_tokens
        .iter()
        .map(|blinded_token| signing_key.sign(blinded_token).unwrap())
        .collect();
    let proof = BatchDLEQProof::create(blinded_tokens, &signed_tokens, signing_key);
    SignedTokensResponse::new(&signing_key.public_key(), &signed_tokens, &proof)
        .unwrap()
        .to_value()
}

pub(crate) fn unblinded_tokens(count: usize) -> Vec<UnblindedToken> {
    let signing_key = SigningKey::random();
    let batch = CredentialBatch::generate(count);
    let response = issuer_response(&signing_key, &batch.blinded_tokens());
    batch
        .verify_and_unblind(&response, &signing_key.public_key())
        .unwrap()
}
