use rand::rngs::OsRng;

use super::{optional_value_type, BlindedToken, PublicKey, SignedToken};

optional_value_type!(secret
    /// Issuer secret k.
    SigningKey, cbr::SigningKey, "signing key");

impl SigningKey {
    pub fn random() -> Self {
        Self::from_raw(cbr::SigningKey::random(&mut OsRng))
    }

    /// Without a value this is a `PublicKey` without a value too
    pub fn public_key(&self) -> PublicKey {
        self.get()
            .map(|signing_key| PublicKey::from_raw(*signing_key.public_key()))
            .unwrap_or_default()
    }

    pub fn sign(&self, blinded_token: &BlindedToken) -> Option<SignedToken> {
        let signing_key = self.get()?;
        let blinded_token = blinded_token.get()?;
        Some(SignedToken::from_raw(signing_key.sign(blinded_token)))
    }
}
