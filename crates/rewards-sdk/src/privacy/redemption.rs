/// Redemption credential: base64(JSON {"signature": HMAC(vk, payload), "t": preimage}).
/// The issuer recomputes W = k * H(t) to check the signature; W itself is never sent.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tokens::{TokenPreimage, UnblindedToken, VerificationSignature};

#[derive(Serialize, Deserialize)]
struct CredentialPayload {
    signature: String,
    t: String,
}

pub fn build_credential(unblinded_token: &UnblindedToken, payload: &str) -> Option<String> {
    let verification_key = unblinded_token.derive_verification_key()?;
    let signature = verification_key.sign(payload)?;

    let credential = CredentialPayload {
        signature: signature.encode_base64()?,
        t: unblinded_token.preimage()?.encode_base64()?,
    };

    match serde_json::to_vec(&credential) {
        Ok(json) => Some(STANDARD.encode(json)),
        Err(e) => {
            debug!("Failed to serialize credential: {}", e);
            None
        }
    }
}

/// Checks a credential against the unblinded token the verifier reconstructed
pub fn verify_credential(
    credential_base64: &str,
    unblinded_token: &UnblindedToken,
    payload: &str,
) -> bool {
    let Some(credential) = decode_credential(credential_base64) else {
        return false;
    };

    let preimage = TokenPreimage::decode_base64(&credential.t);
    if !preimage.has_value() || unblinded_token.preimage().as_ref() != Some(&preimage) {
        return false;
    }

    let signature = VerificationSignature::decode_base64(&credential.signature);
    unblinded_token
        .derive_verification_key()
        .is_some_and(|verification_key| verification_key.verify(&signature, payload))
}

/// The preimage a credential claims to redeem
pub fn credential_preimage(credential_base64: &str) -> Option<TokenPreimage> {
    let preimage = TokenPreimage::decode_base64(&decode_credential(credential_base64)?.t);
    preimage.has_value().then_some(preimage)
}

fn decode_credential(credential_base64: &str) -> Option<CredentialPayload> {
    let json = match STANDARD.decode(credential_base64) {
        Ok(json) => json,
        Err(e) => {
            debug!("Failed to decode credential: {}", e);
            return None;
        }
    };

    match serde_json::from_slice(&json) {
        Ok(credential) => Some(credential),
        Err(e) => {
            debug!("Failed to parse credential: {}", e);
            None
        }
    }
}
