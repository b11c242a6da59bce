#![forbid(unsafe_code)]

//! Read-through cache of tokenized strings.
//!
//! Tokenizing the same literal over and over (log prefixes, table borders,
//! banner lines) is wasted work. A [`TokenCache`] maps each distinct input
//! string to its shared token sequence. Entries are inserted only after the
//! token sequence is complete and are never changed or evicted afterwards,
//! so the cache grows with the set of strings actually tokenized.
//!
//! With the `global_cache` feature (on by default) a process-wide instance is
//! available through [`TokenCache::global`]; tests and other callers that
//! need isolation create their own with [`TokenCache::new`].
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use tinta_text::TokenCache;
//!
//! let cache = TokenCache::new();
//! let a = cache.tokenize("\x1b[1mbold\x1b[22m");
//! let b = cache.tokenize("\x1b[1mbold\x1b[22m");
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::token::{Token, tokenize};

/// Counters describing cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that tokenized their input.
    pub misses: u64,
    /// Distinct strings held.
    pub size: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe map from input strings to their token sequences.
pub struct TokenCache {
    entries: RwLock<FxHashMap<Box<str>, Arc<[Token]>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TokenCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The process-wide cache, created on first use.
    #[cfg(feature = "global_cache")]
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: std::sync::OnceLock<TokenCache> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Tokens of `text`, tokenizing it on first request.
    ///
    /// Concurrent first requests for the same text may both tokenize it;
    /// only the first completed sequence is kept and returned to both.
    pub fn tokenize(&self, text: &str) -> Arc<[Token]> {
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
            .cloned();
        if let Some(tokens) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(bytes = text.len(), "token cache hit");
            return tokens;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(bytes = text.len(), "token cache miss");
        let tokens: Arc<[Token]> = tokenize(text).into();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(Box::from(text)).or_insert(tokens))
    }

    /// Whether `text` has been tokenized through this cache.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(text)
    }

    /// Number of distinct strings held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tracing_test::traced_test;

    #[test]
    fn new_cache_is_empty() {
        let cache = TokenCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }

    #[test]
    fn repeated_lookups_share_tokens() {
        let cache = TokenCache::new();
        let first = cache.tokenize("\x1b[31mred\x1b[39m");
        let second = cache.tokenize("\x1b[31mred\x1b[39m");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 3);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                size: 1
            }
        );
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_inputs_are_distinct_entries() {
        let cache = TokenCache::new();
        cache.tokenize("a");
        cache.tokenize("b");
        cache.tokenize("");
        assert_eq!(cache.len(), 3);
        assert!(cache.contains("b"));
        assert!(!cache.contains("c"));
        assert!(cache.tokenize("").is_empty());
    }

    #[test]
    fn caches_are_isolated() {
        let one = TokenCache::new();
        let two = TokenCache::new();
        one.tokenize("x");
        assert!(two.is_empty());
    }

    #[test]
    fn concurrent_readers_agree() {
        let cache = Arc::new(TokenCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.tokenize("\x1b[1mshared\x1b[22m"))
            })
            .collect();
        let results: Vec<Arc<[Token]>> = handles
            .into_iter()
            .map(|h| h.join().expect("tokenizer thread panicked"))
            .collect();
        for tokens in &results {
            assert_eq!(tokens.as_ref(), results[0].as_ref());
        }
        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, 8);
        assert_eq!(stats.size, 1);
    }

    #[test]
    #[traced_test]
    fn logs_hits_and_misses() {
        let cache = TokenCache::new();
        cache.tokenize("logged");
        cache.tokenize("logged");
        assert!(logs_contain("token cache miss"));
        assert!(logs_contain("token cache hit"));
    }

    #[cfg(feature = "global_cache")]
    #[test]
    fn global_cache_is_shared() {
        let a = TokenCache::global();
        let b = TokenCache::global();
        assert!(std::ptr::eq(a, b));
        a.tokenize("global entry");
        assert!(b.contains("global entry"));
    }
}
