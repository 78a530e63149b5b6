use super::optional_value_type;

optional_value_type!(
    /// Q = k * P, returned by the issuer in request order.
    SignedToken, cbr::SignedToken, "signed token");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::tokens::{SigningKey, Token};

    #[test]
    fn test_roundtrip() {
        let signing_key = SigningKey::random();
        let blinded = Token::random().blind().unwrap();
        let signed = signing_key.sign(&blinded).unwrap();

        let decoded = SignedToken::decode_base64(&signed.encode_base64().unwrap());
        assert!(decoded.has_value());
        assert_eq!(decoded, signed);
    }
}
