//! HTTP client for the intake API.
//!
//! Used by the CLI to submit and list records against a running server.
//! Mirrors the transport contract: flat string maps in, records out, with
//! `{"error": ...}` bodies on failure.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{Record, RecordKind};

/// Error payload shape returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for one intake API endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the API at the given base URL
    /// (e.g. `http://127.0.0.1:3001/api`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// List one collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn list(&self, kind: RecordKind) -> Result<Vec<Record>> {
        let url = self.url(kind.collection_name());
        debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        Self::parse(response).await
    }

    /// Fetch the merged listing (all claims, then all requests).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn list_merged(&self) -> Result<Vec<Record>> {
        let url = self.url("registros");
        debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        Self::parse(response).await
    }

    /// Create a record in one collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn create(
        &self,
        kind: RecordKind,
        fields: BTreeMap<String, String>,
    ) -> Result<Record> {
        let url = self.url(kind.collection_name());
        debug!("POST {url}");

        let response = self.http.post(&url).json(&fields).send().await?;
        Self::parse(response).await
    }

    /// Patch a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the server answers 404, or an
    /// error if the request fails or the server reports another failure.
    pub async fn update(
        &self,
        kind: RecordKind,
        id: i64,
        patch: BTreeMap<String, String>,
    ) -> Result<Record> {
        let url = self.url(&format!("{}/{id}", kind.collection_name()));
        debug!("PUT {url}");

        let response = self.http.put(&url).json(&patch).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::not_found(kind, id));
        }
        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}
