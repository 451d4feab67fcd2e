//! LookupDebouncer - Debounced By-Id Autofill
//!
//! Used for cédula-based prefill while the user is still typing. The key is
//! re-checked after the debounce window and again when the fetch resolves;
//! a stale resolution is discarded. The network request itself is not
//! aborted, only its result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::constants::LOOKUP_DEBOUNCE_MS;
use crate::error::Result;

/// Debounced lookup with cancellation-by-staleness
#[derive(Clone)]
pub struct LookupDebouncer {
    current_key: Arc<Mutex<String>>,
    debounce: Duration,
}

impl LookupDebouncer {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(LOOKUP_DEBOUNCE_MS))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            current_key: Arc::new(Mutex::new(String::new())),
            debounce,
        }
    }

    /// Run a lookup for `key`; returns `Ok(None)` when a newer key superseded
    /// this one during the debounce window or while the fetch was in flight
    pub async fn lookup<F, Fut, T>(&self, key: &str, fetch: F) -> Result<Option<T>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        *self.current_key.lock() = key.to_string();

        tokio::time::sleep(self.debounce).await;
        if *self.current_key.lock() != key {
            return Ok(None);
        }

        let value = fetch(key.to_string()).await?;

        if *self.current_key.lock() != key {
            tracing::debug!("Discarding stale lookup result for '{key}'");
            return Ok(None);
        }
        Ok(Some(value))
    }
}

impl Default for LookupDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_resolves_for_current_key() {
        let debouncer = LookupDebouncer::with_debounce(Duration::from_millis(1));
        let result = debouncer
            .lookup("8-123", |key| async move { Ok(format!("nombre de {key}")) })
            .await
            .expect("lookup");
        assert_eq!(result, Some("nombre de 8-123".to_string()));
    }

    #[tokio::test]
    async fn test_newer_key_discards_older_resolution() {
        let debouncer = LookupDebouncer::with_debounce(Duration::from_millis(1));

        let old = debouncer.lookup("8-111", |key| async move {
            // slow fetch, superseded while in flight
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(key)
        });
        let new = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            debouncer
                .lookup("8-222", |key| async move { Ok(key) })
                .await
        };

        let (old, new) = tokio::join!(old, new);
        assert_eq!(old.expect("old lookup"), None);
        assert_eq!(new.expect("new lookup"), Some("8-222".to_string()));
    }

    #[tokio::test]
    async fn test_key_change_during_debounce_skips_fetch() {
        let debouncer = LookupDebouncer::with_debounce(Duration::from_millis(30));

        let first = debouncer.lookup("8-111", |_| async move {
            panic!("fetch must not run for a superseded key")
        });
        let second = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            debouncer
                .lookup("8-222", |key| async move { Ok(key) })
                .await
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first.expect("first lookup"), None::<String>);
        assert_eq!(second.expect("second lookup"), Some("8-222".to_string()));
    }
}
