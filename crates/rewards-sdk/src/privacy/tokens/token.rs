use rand::rngs::OsRng;

use super::{optional_value_type, BlindedToken, TokenPreimage};

optional_value_type!(secret
    /// Client-side preimage plus blinding scalar. Stays on the device.
    Token, cbr::Token, "token");

impl Token {
    /// Fresh token from the OS RNG; always has a value.
    pub fn random() -> Self {
        Self::from_raw(cbr::Token::random(&mut OsRng))
    }

    pub fn blind(&self) -> Option<BlindedToken> {
        self.get().map(|token| BlindedToken::from_raw(token.blind()))
    }

    pub fn preimage(&self) -> Option<TokenPreimage> {
        self.get()
            .map(|token| TokenPreimage::from_raw(token.preimage()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_has_value() {
        let token = Token::random();
        assert!(token.has_value());
        assert!(token.blind().is_some());
    }

    #[test]
    fn test_empty_token_cannot_blind() {
        let token = Token::decode_base64("");
        assert!(!token.has_value());
        assert!(token.blind().is_none());
        assert!(token.preimage().is_none());
        assert_eq!(token.to_string(), "");
    }

    #[test]
    fn test_roundtrip() {
        let token = Token::random();
        let encoded = token.encode_base64().unwrap();
        assert_eq!(Token::decode_base64(&encoded), token);
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = Token::random();
        let encoded = token.encode_base64().unwrap();
        assert!(!format!("{:?}", token).contains(&encoded));
    }
}
