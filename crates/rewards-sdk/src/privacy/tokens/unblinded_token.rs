use super::{optional_value_type, TokenPreimage, VerificationKey};

optional_value_type!(secret
    /// Redeemable credential (t, W). Spent once, through a verification key signature.
    UnblindedToken, cbr::UnblindedToken, "unblinded token");

impl UnblindedToken {
    pub fn preimage(&self) -> Option<TokenPreimage> {
        self.get()
            .map(|unblinded_token| TokenPreimage::from_raw(unblinded_token.preimage()))
    }

    pub fn derive_verification_key(&self) -> Option<VerificationKey> {
        self.get().map(|unblinded_token| {
            VerificationKey::from_raw(unblinded_token.derive_verification_key())
        })
    }
}
