//! The connected backend client.

use std::sync::Arc;

use crate::auth::Auth;
use crate::config::Config;
use crate::diag::ErrorLog;
use crate::error::InitError;
use crate::query::QueryBuilder;
use crate::storage::{default_store, KvStore};

/// Handle to the remote backend. Built exactly once at startup with
/// [`Client::connect`] and handed down by the shells; cloning is cheap
/// and every clone shares the same session and change stream.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

// Clone identity, so UI layers can memoize on the handle.
impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

struct ClientInner {
    http: reqwest::Client,
    config: Config,
    auth: Auth,
    log: ErrorLog,
}

impl Client {
    /// Connect using the platform default storage for session persistence
    /// and diagnostics.
    pub fn connect(config: Config) -> Result<Self, InitError> {
        Self::connect_with_store(config, default_store())
    }

    /// Connect with an explicit storage adapter. Used by tests and by
    /// callers that scope persistence somewhere non-standard.
    pub fn connect_with_store(
        config: Config,
        store: Arc<dyn KvStore>,
    ) -> Result<Self, InitError> {
        let url = reqwest::Url::parse(&config.url)
            .map_err(|e| InitError::InvalidUrl(format!("{}: {e}", config.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(InitError::InvalidUrl(config.url.clone()));
        }

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(crate::config::REQUEST_TIMEOUT);
        let http = builder
            .build()
            .map_err(|e| InitError::HttpClient(e.to_string()))?;

        let auth = Auth::new(http.clone(), config.clone(), store.clone());
        let log = ErrorLog::new(store);
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                auth,
                log,
            }),
        })
    }

    /// Auth operations: sessions, credentials, the change stream.
    pub fn auth(&self) -> &Auth {
        &self.inner.auth
    }

    /// Start a query against a table of the data API.
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(
            self.inner.http.clone(),
            self.inner.config.clone(),
            self.inner.auth.clone(),
            table,
        )
    }

    /// The persistent diagnostic log shared with this client's storage.
    pub fn error_log(&self) -> &ErrorLog {
        &self.inner.log
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_connect_rejects_bad_urls() {
        let store = || Arc::new(MemoryStore::new()) as Arc<dyn KvStore>;

        let err = Client::connect_with_store(Config::new("not a url", "k"), store());
        assert!(matches!(err, Err(InitError::InvalidUrl(_))));

        let err = Client::connect_with_store(Config::new("ftp://x.example", "k"), store());
        assert!(matches!(err, Err(InitError::InvalidUrl(_))));
    }

    #[test]
    fn test_connect_succeeds_and_clones_share_auth() {
        let store = Arc::new(MemoryStore::new());
        let client =
            Client::connect_with_store(Config::new("https://t.example/", "k"), store).unwrap();
        assert_eq!(client.config().url, "https://t.example");

        let clone = client.clone();
        assert!(client.auth().current_session().is_none());
        assert!(clone.auth().current_session().is_none());
    }
}
