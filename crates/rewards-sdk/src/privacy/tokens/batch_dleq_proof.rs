use rand::rngs::OsRng;
use tracing::{debug, error};

use super::{
    optional_value_type, raw_values, BlindedToken, PublicKey, SignedToken, SigningKey, Token,
    UnblindedToken,
};

optional_value_type!(
    /// One proof covering a whole batch of signed tokens.
    BatchDLEQProof, cbr::BatchDLEQProof, "batch DLEQ proof");

impl BatchDLEQProof {
    pub fn create(
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        signing_key: &SigningKey,
    ) -> Self {
        let Some(signing_key) = signing_key.get() else {
            debug!("Cannot create batch DLEQ proof without a signing key");
            return Self::default();
        };
        let (Some(blinded_tokens), Some(signed_tokens)) = (
            owned_raw_values(blinded_tokens, BlindedToken::get),
            owned_raw_values(signed_tokens, SignedToken::get),
        ) else {
            debug!("Cannot create batch DLEQ proof from tokens without a value");
            return Self::default();
        };

        match cbr::BatchDLEQProof::new(&mut OsRng, &blinded_tokens, &signed_tokens, signing_key) {
            Ok(proof) => Self::from_raw(proof),
            Err(e) => {
                debug!("Failed to create batch DLEQ proof: {}", e);
                Self::default()
            }
        }
    }

    pub fn verify(
        &self,
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        public_key: &PublicKey,
    ) -> bool {
        let (Some(proof), Some(public_key)) = (self.get(), public_key.get()) else {
            return false;
        };
        let (Some(blinded_tokens), Some(signed_tokens)) = (
            owned_raw_values(blinded_tokens, BlindedToken::get),
            owned_raw_values(signed_tokens, SignedToken::get),
        ) else {
            return false;
        };

        match proof.verify(&blinded_tokens, &signed_tokens, public_key) {
            Ok(()) => true,
            Err(e) => {
                debug!("Batch DLEQ proof verification failed: {}", e);
                false
            }
        }
    }

    /// All-or-nothing: either one unblinded token per input token, in input
    /// order, or `None`.
    pub fn verify_and_unblind(
        &self,
        tokens: &[Token],
        blinded_tokens: &[BlindedToken],
        signed_tokens: &[SignedToken],
        public_key: &PublicKey,
    ) -> Option<Vec<UnblindedToken>> {
        let proof = self.get()?;
        let public_key = public_key.get()?;
        if tokens.is_empty() {
            return None;
        }

        let raw_tokens = raw_values(tokens, Token::get)?;
        let blinded_tokens = owned_raw_values(blinded_tokens, BlindedToken::get)?;
        let signed_tokens = owned_raw_values(signed_tokens, SignedToken::get)?;

        let raw_unblinded_tokens = match proof.verify_and_unblind(
            raw_tokens,
            &blinded_tokens,
            &signed_tokens,
            public_key,
        ) {
            Ok(unblinded_tokens) => unblinded_tokens,
            Err(e) => {
                debug!("Failed to verify and unblind tokens: {}", e);
                return None;
            }
        };

        // The primitive pairs tokens with signed tokens by zipping, so a key
        // or batch mismatch can surface only as a short result.
        if raw_unblinded_tokens.len() != tokens.len() {
            error!(
                "Unblinded {} of {} tokens, public key or batch mismatch",
                raw_unblinded_tokens.len(),
                tokens.len()
            );
            return None;
        }

        let unblinded_tokens: Vec<UnblindedToken> = raw_unblinded_tokens
            .into_iter()
            .map(UnblindedToken::from_raw)
            .collect();
        if !unblinded_tokens.iter().all(UnblindedToken::has_value) {
            return None;
        }

        Some(unblinded_tokens)
    }
}

fn owned_raw_values<W, R: Copy>(values: &[W], get: impl Fn(&W) -> Option<&R>) -> Option<Vec<R>> {
    values.iter().map(|value| get(value).copied()).collect()
}
