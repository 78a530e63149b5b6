use super::optional_value_type;

optional_value_type!(
    /// Issuer public key K = k * G.
    PublicKey, cbr::PublicKey, "public key");
