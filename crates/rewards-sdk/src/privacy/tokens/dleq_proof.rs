use rand::rngs::OsRng;
use tracing::debug;

use super::{optional_value_type, BlindedToken, PublicKey, SignedToken, SigningKey};

optional_value_type!(
    /// Proof that a single signed token was produced with the advertised key.
    DLEQProof, cbr::DLEQProof, "DLEQ proof");

impl DLEQProof {
    pub fn create(
        blinded_token: &BlindedToken,
        signed_token: &SignedToken,
        signing_key: &SigningKey,
    ) -> Self {
        match (blinded_token.get(), signed_token.get(), signing_key.get()) {
            (Some(blinded_token), Some(signed_token), Some(signing_key)) => Self::from_raw(
                cbr::DLEQProof::new(&mut OsRng, blinded_token, signed_token, signing_key),
            ),
            _ => {
                debug!("Cannot create DLEQ proof from values without a value");
                Self::default()
            }
        }
    }

    pub fn verify(
        &self,
        blinded_token: &BlindedToken,
        signed_token: &SignedToken,
        public_key: &PublicKey,
    ) -> bool {
        let (Some(proof), Some(blinded_token), Some(signed_token), Some(public_key)) = (
            self.get(),
            blinded_token.get(),
            signed_token.get(),
            public_key.get(),
        ) else {
            return false;
        };

        match proof.verify(blinded_token, signed_token, public_key) {
            Ok(()) => true,
            Err(e) => {
                debug!("DLEQ proof verification failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::tokens::Token;

    #[test]
    fn test_create_and_verify() {
        let signing_key = SigningKey::random();
        let blinded = Token::random().blind().unwrap();
        let signed = signing_key.sign(&blinded).unwrap();

        let proof = DLEQProof::create(&blinded, &signed, &signing_key);
        assert!(proof.has_value());
        assert!(proof.verify(&blinded, &signed, &signing_key.public_key()));
        assert!(!proof.verify(&blinded, &signed, &SigningKey::random().public_key()));
        assert!(!proof.verify(&blinded, &signed, &PublicKey::default()));
    }

    #[test]
    fn test_create_without_key_has_no_value() {
        let signing_key = SigningKey::random();
        let blinded = Token::random().blind().unwrap();
        let signed = signing_key.sign(&blinded).unwrap();

        assert!(!DLEQProof::create(&blinded, &signed, &SigningKey::default()).has_value());
    }

    #[test]
    fn test_base64_round_trip() {
        let signing_key = SigningKey::random();
        let blinded = Token::random().blind().unwrap();
        let signed = signing_key.sign(&blinded).unwrap();
        let proof = DLEQProof::create(&blinded, &signed, &signing_key);

        let decoded = DLEQProof::decode_base64(&proof.encode_base64().unwrap());
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&blinded, &signed, &signing_key.public_key()));
    }
}
