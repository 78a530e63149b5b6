use tracing::debug;

use super::{optional_value_type, VerificationSignature};

optional_value_type!(secret
    /// MAC key derived from an unblinded token.
    VerificationKey, cbr::VerificationKey, "verification key");

impl VerificationKey {
    pub fn sign(&self, message: &str) -> Option<VerificationSignature> {
        match self.get()?.sign(message.as_bytes()) {
            Ok(signature) => Some(VerificationSignature::from_raw(signature)),
            Err(e) => {
                debug!("Failed to sign message: {}", e);
                None
            }
        }
    }

    pub fn verify(&self, signature: &VerificationSignature, message: &str) -> bool {
        let (Some(verification_key), Some(signature)) = (self.get(), signature.get()) else {
            return false;
        };

        match verification_key.verify(signature, message.as_bytes()) {
            Ok(verified) => verified,
            Err(e) => {
                debug!("Failed to verify message signature: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::blinding::{blind_tokens, generate_tokens};
    use crate::privacy::tokens::{BatchDLEQProof, SigningKey};

    fn verification_key() -> VerificationKey {
        let signing_key = SigningKey::random();
        let tokens = generate_tokens(1);
        let blinded_tokens = blind_tokens(&tokens);
        let signed_tokens = vec![signing_key.sign(&blinded_tokens[0]).unwrap()];
        let proof = BatchDLEQProof::create(&blinded_tokens, &signed_tokens, &signing_key);
        let unblinded_tokens = proof
            .verify_and_unblind(
                &tokens,
                &blinded_tokens,
                &signed_tokens,
                &signing_key.public_key(),
            )
            .unwrap();
        unblinded_tokens[0].derive_verification_key().unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let key = verification_key();
        let signature = key.sign("payload").unwrap();
        assert!(key.verify(&signature, "payload"));
        assert!(!key.verify(&signature, "other payload"));
    }

    #[test]
    fn test_verify_rejects_empty_signature() {
        let key = verification_key();
        assert!(!key.verify(&VerificationSignature::default(), "payload"));
        assert!(VerificationKey::default().sign("payload").is_none());
    }

    #[test]
    fn test_base64_round_trip() {
        let key = verification_key();

        let decoded = VerificationKey::decode_base64(&key.encode_base64().unwrap());
        assert_eq!(decoded, key);

        let signature = key.sign("payload").unwrap();
        assert!(decoded.verify(&signature, "payload"));
    }
}
