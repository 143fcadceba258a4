//! Response cache for structured answers.
//!
//! Keys are content-addressed: a SHA-256 digest of the normalized query text
//! and the detail level, namespaced under a fixed prefix. Two queries that
//! differ only in case or surrounding whitespace share a key; two detail
//! levels never do.
//!
//! Eviction is TTL-only — no LRU, no capacity bound. Answers for an
//! identical key are semantically interchangeable, so concurrent writers
//! follow last-writer-wins.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use civiclens_core::{DetailLevel, StructuredAnswer};

/// Namespace prefix for every cache key.
const KEY_PREFIX: &str = "civiclens:query:";

/// A cached answer with its expiry timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    answer: StructuredAnswer,
    expires_at: DateTime<Utc>,
}

/// In-process TTL cache mapping (query, detail level) to a structured answer.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the deterministic cache key for a query.
    ///
    /// The query text is lowercased and trimmed before hashing, so cosmetic
    /// differences in the inbound request do not fragment the cache.
    pub fn key_for(query_text: &str, detail_level: DetailLevel) -> String {
        let normalized = query_text.trim().to_lowercase();
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update(b":");
        hasher.update(detail_level.as_str().as_bytes());
        format!("{KEY_PREFIX}{:x}", hasher.finalize())
    }

    /// Look up a cached answer. Returns `None` if absent or expired.
    ///
    /// Expired entries are removed when observed. This never fails — any
    /// cache problem degrades to a miss.
    pub async fn lookup(&self, key: &str) -> Option<StructuredAnswer> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Some(entry.answer.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry exists but is expired — drop it under a write lock. Another
        // writer may have refreshed it in between, so re-check the expiry.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > Utc::now() {
                return Some(entry.answer.clone());
            }
            debug!(key = %&key[..24.min(key.len())], "Cache entry expired, removing");
            entries.remove(key);
        }
        None
    }

    /// Store an answer under `key`, valid for `ttl`.
    ///
    /// Unconditionally overwrites: a second `store` for the same key replaces
    /// the value and resets the expiry.
    pub async fn store(&self, key: &str, answer: StructuredAnswer, ttl: Duration) {
        let ttl = ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::MAX);
        let entry = CacheEntry {
            answer,
            expires_at: Utc::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
