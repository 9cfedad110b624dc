//! HTTP client for the three upstream endpoint shapes.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::header::{REFERER, USER_AGENT};
use serde::de::IgnoredAny;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::FetchError;

/// Issues single, non-retried GETs against the configured upstream hosts.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(config: UpstreamConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    /// Underlying HTTP client, shared with the dev rewrite proxy.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn posts_url(&self, id: &str) -> String {
        format!("{}/v1.1/channel/{}/home/section/post", host(&self.config.posts_host), id)
    }

    pub fn station_url(&self, id: &str) -> String {
        format!("{}/api/{}/station", host(&self.config.station_host), id)
    }

    pub fn thumbnail_url(&self, bno: &str) -> String {
        format!("{}/m/{}", host(&self.config.image_host), bno)
    }

    /// Channel post section, as the upstream's JSON bytes.
    pub async fn channel_posts(&self, id: &str) -> Result<Bytes, FetchError> {
        self.get_json("posts", &self.posts_url(id)).await
    }

    /// Station and live-broadcast info, as the upstream's JSON bytes.
    pub async fn station_info(&self, id: &str) -> Result<Bytes, FetchError> {
        self.get_json("station", &self.station_url(id)).await
    }

    /// Live thumbnail image bytes. Sent with a User-Agent only.
    pub async fn thumbnail(&self, bno: &str) -> Result<Bytes, FetchError> {
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .get(self.thumbnail_url(bno))
                .header(USER_AGENT, &self.config.user_agent)
                .send()
                .await?;
            Ok::<_, FetchError>(response.bytes().await?)
        }
        .await;

        record("thumb", &result, start);
        result
    }

    async fn get_json(&self, endpoint: &'static str, url: &str) -> Result<Bytes, FetchError> {
        let start = Instant::now();
        let result = async {
            let response = self
                .http
                .get(url)
                .header(USER_AGENT, &self.config.user_agent)
                .header(REFERER, &self.config.referer)
                .send()
                .await?;
            let body = response.bytes().await?;
            serde_json::from_slice::<IgnoredAny>(&body)?;
            Ok::<_, FetchError>(body)
        }
        .await;

        record(endpoint, &result, start);
        result
    }
}

fn host(base: &str) -> &str {
    base.trim_end_matches('/')
}

fn record(endpoint: &'static str, result: &Result<Bytes, FetchError>, start: Instant) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_upstream(endpoint, outcome, start);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> UpstreamClient {
        let config = UpstreamConfig {
            posts_host: format!("{host}/"),
            station_host: host.to_string(),
            image_host: host.to_string(),
            ..UpstreamConfig::default()
        };
        UpstreamClient::new(config, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn url_templates() {
        let c = client("https://up.example");
        assert_eq!(
            c.posts_url("yuambo"),
            "https://up.example/v1.1/channel/yuambo/home/section/post"
        );
        assert_eq!(c.station_url("yuambo"), "https://up.example/api/yuambo/station");
        assert_eq!(c.thumbnail_url("281234567"), "https://up.example/m/281234567");
    }

    #[test]
    fn identifiers_are_forwarded_unvalidated() {
        let c = client("https://up.example");
        assert_eq!(c.station_url("not an id"), "https://up.example/api/not an id/station");
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let c = client(&format!("http://{addr}"));
        let err = c.station_info("x").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.kind(), "transport");
    }
}
