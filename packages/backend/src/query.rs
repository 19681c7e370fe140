//! Record queries against the data API.
//!
//! A thin builder over the PostgREST query string: callers chain
//! `select` / `eq` / `order` / `limit` and finish with [`fetch`]
//! (`QueryBuilder::fetch`). Ordering is done by the backend; results are
//! returned in response order and never re-sorted client-side.

use serde::de::DeserializeOwned;

use crate::auth::Auth;
use crate::config::Config;
use crate::error::Error;

/// Sort direction for [`QueryBuilder::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

/// A pending query. Built by [`crate::Client::from`].
pub struct QueryBuilder {
    http: reqwest::Client,
    config: Config,
    auth: Auth,
    table: String,
    select: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<u32>,
}

impl QueryBuilder {
    pub(crate) fn new(http: reqwest::Client, config: Config, auth: Auth, table: &str) -> Self {
        Self {
            http,
            config,
            auth,
            table: table.to_string(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Columns to return; defaults to `*`.
    pub fn select(mut self, columns: &str) -> Self {
        self.select = columns.to_string();
        self
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Sort by `column`. Later calls replace earlier ones.
    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.order = Some(format!("{column}.{}", direction.suffix()));
        self
    }

    /// Return at most `n` rows.
    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Run the query and deserialize the JSON array of rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let mut request = self
            .http
            .get(self.config.rest_endpoint(&self.table))
            .query(&self.query_pairs())
            .header("apikey", &self.config.anon_key);

        // The user token when signed in, the anon key otherwise.
        request = match self.auth.current_session() {
            Some(session) => request.bearer_auth(&session.access_token),
            None => request.bearer_auth(&self.config.anon_key),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status.as_u16(), &body));
        }
        Ok(response.json::<Vec<T>>().await?)
    }

    /// Query-string pairs in the order they will be sent.
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        pairs.extend(self.filters.iter().cloned());
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn builder(table: &str) -> QueryBuilder {
        let config = Config::new("https://t.example", "k");
        let auth = Auth::new(
            reqwest::Client::new(),
            config.clone(),
            Arc::new(MemoryStore::new()),
        );
        QueryBuilder::new(reqwest::Client::new(), config, auth, table)
    }

    fn flat(pairs: Vec<(String, String)>) -> String {
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[test]
    fn test_notes_query_shape() {
        let query = builder("notes")
            .select("*")
            .eq("user_id", "u-123")
            .order("created_at", Order::Descending);
        assert_eq!(
            flat(query.query_pairs()),
            "select=*&user_id=eq.u-123&order=created_at.desc"
        );
    }

    #[test]
    fn test_defaults_and_limit() {
        let query = builder("notes");
        assert_eq!(flat(query.query_pairs()), "select=*");

        let query = builder("notes").limit(50).order("updated_at", Order::Ascending);
        assert_eq!(
            flat(query.query_pairs()),
            "select=*&order=updated_at.asc&limit=50"
        );
    }

    #[test]
    fn test_filters_keep_call_order() {
        let query = builder("notes").eq("user_id", "u1").eq("archived", "false");
        assert_eq!(
            flat(query.query_pairs()),
            "select=*&user_id=eq.u1&archived=eq.false"
        );
    }
}
