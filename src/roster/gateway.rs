//! Client for a running gateway, used by the Roster View outside the server.

use axum::body::Bytes;
use serde_json::Value;

use crate::http::{POSTS_PATH, STATION_PATH, THUMB_PATH};
use crate::roster::live::StationSource;
use crate::upstream::FetchError;

/// Talks to `{base}/soop-*` endpoints exposed by [`crate::http::HttpServer`].
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base: String,
}

impl GatewayClient {
    pub fn new(base: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Station JSON as the gateway returned it, error bodies included.
    pub async fn station(&self, id: &str) -> Result<Value, FetchError> {
        self.get_json(STATION_PATH, "id", id).await
    }

    /// Station JSON for a live lookup. A non-2xx gateway answer is a failure,
    /// not an offline station.
    pub async fn live_station(&self, id: &str) -> Result<Value, FetchError> {
        let body = self
            .send(STATION_PATH, "id", id)
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn posts(&self, id: &str) -> Result<Value, FetchError> {
        self.get_json(POSTS_PATH, "id", id).await
    }

    pub async fn thumbnail(&self, bno: &str) -> Result<Bytes, FetchError> {
        let response = self.send(THUMB_PATH, "bno", bno).await?.error_for_status()?;
        Ok(response.bytes().await?)
    }

    // Gateway error bodies are JSON too; callers decide what they mean.
    async fn get_json(&self, path: &str, key: &str, value: &str) -> Result<Value, FetchError> {
        let body = self.send(path, key, value).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .get(format!("{}{}", self.base, path))
            .query(&[(key, value)])
            .send()
            .await
    }
}

impl StationSource for GatewayClient {
    async fn station(&self, id: &str) -> Result<Value, FetchError> {
        self.live_station(id).await
    }
}
