//! Endpoint selection strategies

use alloy::transports::http::reqwest::Url;
use rand::Rng;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Strategy for picking one RPC endpoint out of the configured candidates
pub trait EndpointSelector: Debug + Send + Sync {
    /// Pick a candidate, or `None` when there are none
    fn select<'a>(&self, candidates: &'a [Url]) -> Option<&'a Url>;
}

/// Uniformly random choice (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl EndpointSelector for RandomSelector {
    fn select<'a>(&self, candidates: &'a [Url]) -> Option<&'a Url> {
        if candidates.is_empty() {
            return None;
        }
        candidates.get(rand::rng().random_range(0..candidates.len()))
    }
}

/// Cycles through the candidates across calls
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    next: AtomicUsize,
}

impl EndpointSelector for RoundRobinSelector {
    fn select<'a>(&self, candidates: &'a [Url]) -> Option<&'a Url> {
        if candidates.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        candidates.get(index % candidates.len())
    }
}

/// Always the first configured endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct PrioritySelector;

impl EndpointSelector for PrioritySelector {
    fn select<'a>(&self, candidates: &'a [Url]) -> Option<&'a Url> {
        candidates.first()
    }
}
