/// Spendable unblinded tokens. Changes are announced on a broadcast channel
/// handed in by the owner, so observers subscribe explicitly instead of
/// reaching for shared global state.
use std::collections::{HashSet, VecDeque};

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use super::tokens::UnblindedToken;

pub const DEFAULT_EVENT_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenPoolEvent {
    Added(usize),
    Removed(usize),
    Exhausted,
}

/// FIFO queue plus the base64 encodings of everything in it
#[derive(Default)]
struct PoolState {
    queue: VecDeque<UnblindedToken>,
    encodings: HashSet<String>,
}

pub struct UnblindedTokenPool {
    state: RwLock<PoolState>,
    events: broadcast::Sender<TokenPoolEvent>,
}

impl UnblindedTokenPool {
    pub fn new(events: broadcast::Sender<TokenPoolEvent>) -> Self {
        Self {
            state: RwLock::new(PoolState::default()),
            events,
        }
    }

    pub fn with_channel() -> (Self, broadcast::Receiver<TokenPoolEvent>) {
        let (events, receiver) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        (Self::new(events), receiver)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TokenPoolEvent> {
        self.events.subscribe()
    }

    /// Skips tokens without a value and tokens already in the pool. Returns how many were added.
    pub async fn add_tokens(&self, unblinded_tokens: Vec<UnblindedToken>) -> usize {
        let mut state = self.state.write().await;

        let mut added = 0;
        for unblinded_token in unblinded_tokens {
            let Some(encoding) = unblinded_token.encode_base64() else {
                debug!("Skipping unblinded token without a value");
                continue;
            };
            if !state.encodings.insert(encoding) {
                continue;
            }
            state.queue.push_back(unblinded_token);
            added += 1;
        }

        if added > 0 {
            info!("Added {} unblinded tokens, {} available", added, state.queue.len());
            self.notify(TokenPoolEvent::Added(added));
        }
        added
    }

    /// Oldest token first
    pub async fn take_token(&self) -> Option<UnblindedToken> {
        let mut state = self.state.write().await;
        let unblinded_token = state.queue.pop_front()?;
        if let Some(encoding) = unblinded_token.encode_base64() {
            state.encodings.remove(&encoding);
        }

        self.notify(TokenPoolEvent::Removed(1));
        if state.queue.is_empty() {
            self.notify(TokenPoolEvent::Exhausted);
        }
        Some(unblinded_token)
    }

    pub async fn remove_tokens(&self, unblinded_tokens: &[UnblindedToken]) -> usize {
        let mut state = self.state.write().await;
        let PoolState { queue, encodings } = &mut *state;

        let mut removed = 0;
        for encoding in unblinded_tokens.iter().filter_map(UnblindedToken::encode_base64) {
            if encodings.remove(&encoding) {
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }

        queue.retain(|unblinded_token| {
            unblinded_token
                .encode_base64()
                .is_some_and(|encoding| encodings.contains(&encoding))
        });

        self.notify(TokenPoolEvent::Removed(removed));
        if queue.is_empty() {
            self.notify(TokenPoolEvent::Exhausted);
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.queue.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.queue.is_empty()
    }

    pub async fn tokens(&self) -> Vec<UnblindedToken> {
        self.state.read().await.queue.iter().cloned().collect()
    }

    fn notify(&self, event: TokenPoolEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::test_helpers::unblinded_tokens;

    #[tokio::test]
    async fn test_add_deduplicates_and_skips_invalid() {
        let (pool, mut events) = UnblindedTokenPool::with_channel();
        let tokens = unblinded_tokens(3);

        let mut batch = tokens.clone();
        batch.push(tokens[0].clone());
        batch.push(UnblindedToken::default());

        assert_eq!(pool.add_tokens(batch).await, 3);
        assert_eq!(pool.count().await, 3);
        assert_eq!(events.recv().await.unwrap(), TokenPoolEvent::Added(3));

        assert_eq!(pool.add_tokens(tokens).await, 0);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_take_in_insertion_order_until_exhausted() {
        let (pool, mut events) = UnblindedTokenPool::with_channel();
        let tokens = unblinded_tokens(2);
        pool.add_tokens(tokens.clone()).await;
        let _ = events.recv().await;

        assert_eq!(pool.take_token().await, Some(tokens[0].clone()));
        assert_eq!(events.recv().await.unwrap(), TokenPoolEvent::Removed(1));

        assert_eq!(pool.take_token().await, Some(tokens[1].clone()));
        assert_eq!(events.recv().await.unwrap(), TokenPoolEvent::Removed(1));
        assert_eq!(events.recv().await.unwrap(), TokenPoolEvent::Exhausted);

        assert!(pool.take_token().await.is_none());
        assert!(pool.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_tokens() {
        let (pool, _events) = UnblindedTokenPool::with_channel();
        let tokens = unblinded_tokens(3);
        pool.add_tokens(tokens.clone()).await;

        assert_eq!(pool.remove_tokens(&tokens[..2]).await, 2);
        assert_eq!(pool.tokens().await, vec![tokens[2].clone()]);
    }

    #[tokio::test]
    async fn test_taken_token_can_be_added_again() {
        let (pool, _events) = UnblindedTokenPool::with_channel();
        let tokens = unblinded_tokens(2);
        pool.add_tokens(tokens.clone()).await;

        let taken = pool.take_token().await.unwrap();
        assert_eq!(pool.add_tokens(vec![taken.clone()]).await, 1);
        assert_eq!(pool.tokens().await, vec![tokens[1].clone(), taken]);
    }

    #[tokio::test]
    async fn test_remove_unknown_tokens_is_a_no_op() {
        let (pool, mut events) = UnblindedTokenPool::with_channel();
        pool.add_tokens(unblinded_tokens(2)).await;
        let _ = events.recv().await;

        assert_eq!(pool.remove_tokens(&unblinded_tokens(1)).await, 0);
        assert_eq!(pool.count().await, 2);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_large_batch_keeps_order() {
        let (pool, _events) = UnblindedTokenPool::with_channel();
        let tokens = unblinded_tokens(40);

        let mut batch = tokens.clone();
        batch.extend(tokens.iter().cloned());
        assert_eq!(pool.add_tokens(batch).await, 40);

        for expected in &tokens {
            assert_eq!(pool.take_token().await.as_ref(), Some(expected));
        }
        assert!(pool.is_empty().await);
    }
}
