use super::optional_value_type;

optional_value_type!(
    /// P = r * H(t), sent to the issuer.
    BlindedToken, cbr::BlindedToken, "blinded token");
