//! Best-effort diagnostic error log.
//!
//! Caught async failures land here so users can export something useful
//! from a support conversation. The log is advisory: recording never
//! fails, never panics, and is skipped entirely when the store is broken.
//! Validation failures are not errors and are never recorded.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::storage::KvStore;

/// Storage key for the persisted log.
pub const ERROR_LOG_KEY: &str = "noteless_error_log";

/// Maximum entries kept; older entries are dropped from the front.
pub const ERROR_LOG_CAP: usize = 20;

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// RFC 3339 timestamp of when the failure was recorded.
    pub timestamp: String,
    /// The error's display message.
    pub message: String,
    /// Debug rendering of the error, standing in for a stack trace.
    pub stack: String,
    /// Where in the app the failure happened, e.g. `"session_bootstrap"`.
    pub context: String,
}

/// Ring of the most recent [`ERROR_LOG_CAP`] failures, persisted through
/// a [`KvStore`].
#[derive(Clone)]
pub struct ErrorLog {
    store: Arc<dyn KvStore>,
}

impl ErrorLog {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Append a failure. Storage or serialization problems are swallowed;
    /// the error is still emitted through `tracing` either way.
    pub fn record(&self, context: &str, error: &dyn std::fmt::Debug, message: &str) {
        tracing::error!(context, "{message}");

        let mut entries = self.entries();
        entries.push(ErrorEntry {
            timestamp: Utc::now().to_rfc3339(),
            message: message.to_string(),
            stack: format!("{error:?}"),
            context: context.to_string(),
        });
        let start = entries.len().saturating_sub(ERROR_LOG_CAP);
        let entries = &entries[start..];

        if let Ok(json) = serde_json::to_string(entries) {
            self.store.set(ERROR_LOG_KEY, &json);
        }
    }

    /// Read the log back, oldest first. A missing or corrupt log is empty.
    pub fn entries(&self) -> Vec<ErrorEntry> {
        self.store
            .get(ERROR_LOG_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Drop all recorded entries.
    pub fn clear(&self) {
        self.store.remove(ERROR_LOG_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::storage::MemoryStore;

    fn log_over_memory() -> (ErrorLog, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ErrorLog::new(store.clone()), store)
    }

    #[test]
    fn test_record_and_read_back() {
        let (log, _) = log_over_memory();
        let err = Error::new(ErrorKind::Network, "Network request failed");
        log.record("session_bootstrap", &err, "Network request failed");

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].context, "session_bootstrap");
        assert_eq!(entries[0].message, "Network request failed");
        assert!(entries[0].stack.contains("Network"));
        assert!(!entries[0].timestamp.is_empty());
    }

    #[test]
    fn test_log_keeps_only_most_recent_20() {
        let (log, _) = log_over_memory();
        for i in 0..25 {
            let err = Error::new(ErrorKind::Unknown, format!("failure {i}"));
            log.record("auth_submit", &err, &format!("failure {i}"));
        }

        let entries = log.entries();
        assert_eq!(entries.len(), ERROR_LOG_CAP);
        // Oldest five were dropped; newest is last.
        assert_eq!(entries[0].message, "failure 5");
        assert_eq!(entries[19].message, "failure 24");
    }

    #[test]
    fn test_corrupt_log_reads_as_empty() {
        let (log, store) = log_over_memory();
        store.set(ERROR_LOG_KEY, "not json at all");
        assert!(log.entries().is_empty());

        // Recording over a corrupt log starts fresh rather than failing.
        let err = Error::new(ErrorKind::Unknown, "x");
        log.record("notes_fetch", &err, "x");
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_record_never_panics_on_dead_store() {
        struct DeadStore;
        impl KvStore for DeadStore {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&self, _key: &str, _value: &str) {}
            fn remove(&self, _key: &str) {}
        }

        let log = ErrorLog::new(Arc::new(DeadStore));
        let err = Error::new(ErrorKind::Network, "offline");
        log.record("session_bootstrap", &err, "offline");
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_clear() {
        let (log, _) = log_over_memory();
        let err = Error::new(ErrorKind::Unknown, "x");
        log.record("auth_submit", &err, "x");
        log.clear();
        assert!(log.entries().is_empty());
    }
}
