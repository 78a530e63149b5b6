use super::optional_value_type;

optional_value_type!(
    /// Revealed at redemption time as the token's public identifier.
    TokenPreimage, cbr::TokenPreimage, "token preimage");
