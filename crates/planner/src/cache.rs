//! Response cache owned by the orchestrator.
//!
//! Model calls are slow and metered, so raw responses are kept for a fixed
//! TTL, keyed by request kind and normalized query. Expired entries are
//! ignored on read and dropped on the next insert or by `purge_expired`.

use crate::source::{GenerationRequest, RequestKind};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: RequestKind,
    query: String,
}

impl CacheKey {
    /// Queries differing only in case or surrounding whitespace share an entry.
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            kind: request.kind,
            query: request.query.trim().to_lowercase(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    body: String,
}

/// TTL cache of raw model responses.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached body for `request`, if present and younger than the TTL.
    pub fn get(&self, request: &GenerationRequest) -> Option<String> {
        let key = CacheKey::from_request(request);
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .get(&key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.body.clone())
    }

    /// Store `body` for `request`. Expired entries are dropped first, so the
    /// map only holds live responses plus the new one.
    pub fn insert(&self, request: &GenerationRequest, body: String) {
        let key = CacheKey::from_request(request);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                body,
            },
        );
    }

    /// Drop expired entries now; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
