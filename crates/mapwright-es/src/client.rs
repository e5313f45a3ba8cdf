//! Thin HTTP client over the engine's REST surface.
//!
//! One request, one response, no retries: transport failures and non-2xx
//! statuses are classified into the crate error taxonomy and returned to
//! the caller untouched.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use mapwright_core::SchemaDocument;

use crate::config::EsConfig;
use crate::error::{Error, Result};
use crate::health::ClusterHealth;
use crate::response::SearchResponse;

/// HTTP access to one engine endpoint.
#[derive(Debug, Clone)]
pub(crate) struct EsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EsClient {
    /// Builds a client with the configured per-request timeout.
    pub(crate) fn new(config: &EsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_http(http, &config.endpoint))
    }

    /// Wraps an externally built `reqwest::Client`.
    pub(crate) fn with_http(http: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// `PUT /{index}` — submit the index schema.
    pub(crate) async fn put_index(&self, index: &str, schema: &SchemaDocument) -> Result<Value> {
        let response = self.http.put(self.url(index)).json(schema).send().await?;
        checked_json(response).await
    }

    /// `GET /{index}/_search` with a query body.
    pub(crate) async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let response = self
            .http
            .get(self.url(&format!("{index}/_search")))
            .json(body)
            .send()
            .await?;
        checked_json(response).await
    }

    /// `PUT /{index}/_doc/{id}?refresh=true` — index one document.
    pub(crate) async fn put_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<Value> {
        let response = self
            .http
            .put(self.url(&format!("{index}/_doc/{id}")))
            .query(&[("refresh", "true")])
            .json(document)
            .send()
            .await?;
        checked_json(response).await
    }

    /// `GET /_cluster/health`.
    pub(crate) async fn health(&self) -> Result<ClusterHealth> {
        let response = self.http.get(self.url("_cluster/health")).send().await?;
        checked_json(response).await
    }
}

/// Decodes a 2xx response body; classifies everything else.
async fn checked_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status.as_u16(), body))
}

/// Maps a non-2xx status to the error taxonomy: 5xx is an engine failure,
/// everything else (including unexpected 1xx/3xx) is treated as a client
/// error — the request produced something the engine would not serve.
pub(crate) fn classify_status(status: u16, body: String) -> Error {
    if (500..600).contains(&status) {
        Error::EngineServer { status, body }
    } else {
        Error::EngineClient { status, body }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            classify_status(400, String::new()),
            Error::EngineClient { status: 400, .. }
        ));
        assert!(matches!(
            classify_status(404, String::new()),
            Error::EngineClient { status: 404, .. }
        ));
        assert!(matches!(
            classify_status(500, String::new()),
            Error::EngineServer { status: 500, .. }
        ));
        assert!(matches!(
            classify_status(503, String::new()),
            Error::EngineServer { status: 503, .. }
        ));
    }

    #[test]
    fn test_url_building() {
        let client = EsClient::with_http(reqwest::Client::new(), "http://localhost:9200/");
        assert_eq!(client.url("students"), "http://localhost:9200/students");
        assert_eq!(
            client.url("students/_search"),
            "http://localhost:9200/students/_search"
        );
        assert_eq!(
            client.url("_cluster/health"),
            "http://localhost:9200/_cluster/health"
        );
    }
}
