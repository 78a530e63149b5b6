/// Keeps each token next to its blinded form so request and response lists
/// are always built from the same ordering.
use serde_json::Value;

use super::tokens::{BlindedToken, PublicKey, Token, UnblindedToken};
use super::wire::parse_verify_and_unblind_tokens;

#[derive(Clone, Debug)]
pub struct Credential {
    token: Token,
    blinded_token: BlindedToken,
}

impl Credential {
    pub fn new(token: Token) -> Option<Self> {
        let blinded_token = token.blind()?;
        Some(Self {
            token,
            blinded_token,
        })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn blinded_token(&self) -> &BlindedToken {
        &self.blinded_token
    }
}

/// A batch of credentials awaiting signatures. Consumed by
/// `verify_and_unblind`; a failed batch is discarded, never re-sent.
#[derive(Clone, Debug, Default)]
pub struct CredentialBatch {
    credentials: Vec<Credential>,
}

impl CredentialBatch {
    pub fn generate(count: usize) -> Self {
        let credentials = (0..count)
            .filter_map(|_| Credential::new(Token::random()))
            .collect();
        Self { credentials }
    }

    /// `None` if any token lacks a value
    pub fn from_tokens(tokens: Vec<Token>) -> Option<Self> {
        let credentials = tokens
            .into_iter()
            .map(Credential::new)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { credentials })
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.credentials
            .iter()
            .map(|credential| credential.token.clone())
            .collect()
    }

    /// Request body list, in batch order
    pub fn blinded_tokens(&self) -> Vec<BlindedToken> {
        self.credentials
            .iter()
            .map(|credential| credential.blinded_token.clone())
            .collect()
    }

    pub fn verify_and_unblind(
        self,
        response: &Value,
        public_key: &PublicKey,
    ) -> Option<Vec<UnblindedToken>> {
        parse_verify_and_unblind_tokens(
            response,
            &self.tokens(),
            &self.blinded_tokens(),
            public_key,
        )
    }
}
