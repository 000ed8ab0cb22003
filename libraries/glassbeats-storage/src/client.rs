//! Low-level client for the hosted store.
//!
//! Speaks the store's generic REST surface: per-table query/insert/update/
//! delete with `eq`/`order`/`limit` filters, plus object-storage uploads.
//! All requests are scoped to the authenticated identity via bearer token
//! and api-key headers.

use crate::error::{Result, StoreError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Connection settings for the hosted store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store (no trailing slash required)
    pub base_url: String,

    /// Project api key sent with every request
    pub api_key: String,

    /// Bearer token of the authenticated user
    pub access_token: String,
}

impl StoreConfig {
    /// Create a config from URL, api key, and user token.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }
}

/// HTTP client for the store's REST and object-storage surfaces.
pub struct StoreClient {
    http: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl StoreClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(StoreError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(StoreError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("GlassBeats/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Request)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            access_token: config.access_token,
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.access_token)
            .header("apikey", &self.api_key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                StoreError::Unreachable(e.to_string())
            } else {
                StoreError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(StoreError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn parse_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
        response
            .json()
            .await
            .map_err(|e| StoreError::ParseError(format!("Failed to parse rows: {e}")))
    }

    /// Query rows from a table.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!(table, ?query, "store select");
        let response =
            Self::send(self.authed(self.http.get(self.table_url(table)).query(query))).await?;
        Self::parse_rows(response).await
    }

    /// Insert rows into a table, returning the created representation.
    pub async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &impl Serialize,
    ) -> Result<Vec<T>> {
        debug!(table, "store insert");
        let response = Self::send(
            self.authed(self.http.post(self.table_url(table)))
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await?;
        Self::parse_rows(response).await
    }

    /// Update rows matching the filters.
    pub async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &impl Serialize,
    ) -> Result<()> {
        debug!(table, ?filters, "store update");
        Self::send(
            self.authed(self.http.patch(self.table_url(table)).query(filters))
                .json(body),
        )
        .await?;
        Ok(())
    }

    /// Delete rows matching the filters.
    pub async fn delete(&self, table: &str, filters: &[(&str, String)]) -> Result<()> {
        debug!(table, ?filters, "store delete");
        Self::send(self.authed(self.http.delete(self.table_url(table)).query(filters))).await?;
        Ok(())
    }

    /// Upload a blob to object storage; returns its public URL.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        debug!(bucket, path, "store upload");
        Self::send(
            self.authed(self.http.post(&url))
                .header("Content-Type", content_type.to_string())
                .header("x-upsert", "true")
                .body(bytes),
        )
        .await?;

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_url() {
        let result = StoreClient::new(StoreConfig::new("", "key", "token"));
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));
    }

    #[test]
    fn rejects_missing_scheme() {
        let result = StoreClient::new(StoreConfig::new("store.example.com", "key", "token"));
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));
    }

    #[test]
    fn normalizes_trailing_slash() {
        let client =
            StoreClient::new(StoreConfig::new("https://store.example.com/", "key", "token"))
                .unwrap();
        assert_eq!(
            client.table_url("songs"),
            "https://store.example.com/rest/v1/songs"
        );
    }
}
