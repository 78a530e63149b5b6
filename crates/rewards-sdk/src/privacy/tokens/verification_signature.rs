use super::optional_value_type;

optional_value_type!(
    /// HMAC over a redemption payload.
    VerificationSignature, cbr::VerificationSignature, "verification signature");
