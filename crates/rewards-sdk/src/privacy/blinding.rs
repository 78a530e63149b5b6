use tracing::debug;

use super::tokens::{BlindedToken, Token};

pub fn generate_tokens(count: usize) -> Vec<Token> {
    (0..count).map(|_| Token::random()).collect()
}

/// `blinded_tokens[i]` is the blinded form of `tokens[i]`. If any token has no
/// value the whole batch is dropped and the result is empty.
pub fn blind_tokens(tokens: &[Token]) -> Vec<BlindedToken> {
    let blinded_tokens: Option<Vec<BlindedToken>> = tokens.iter().map(Token::blind).collect();

    blinded_tokens.unwrap_or_else(|| {
        debug!("Failed to blind tokens, batch contains a token without a value");
        Vec::new()
    })
}
