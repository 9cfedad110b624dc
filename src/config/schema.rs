//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the board.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the crew board.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BoardConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream platform hosts and request headers.
    pub upstream: UpstreamConfig,

    /// Cache lifetimes advertised to intermediary caches.
    pub cache: CacheConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Development rewrite proxy.
    pub dev_proxy: DevProxyConfig,

    /// Roster view settings.
    pub roster: RosterConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream endpoints the gateway forwards to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Channel API host serving post sections.
    pub posts_host: String,

    /// Station API host serving live status.
    pub station_host: String,

    /// Live thumbnail image host.
    pub image_host: String,

    /// User-Agent sent on every upstream call.
    pub user_agent: String,

    /// Referer sent on JSON upstream calls.
    pub referer: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            posts_host: "https://api-channel.sooplive.co.kr".to_string(),
            station_host: "https://chapi.sooplive.co.kr".to_string(),
            image_host: "https://liveimg.sooplive.co.kr".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            referer: "https://www.sooplive.co.kr/".to_string(),
        }
    }
}

/// Shared-cache lifetimes (`s-maxage`) per endpoint, in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub posts_secs: u64,
    pub station_secs: u64,
    pub thumb_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            posts_secs: 60,
            station_secs: 30,
            thumb_secs: 10,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request deadline in seconds.
    pub request_secs: u64,

    /// Outbound transport timeout in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Prefix rewrites used while developing the widget locally.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevProxyConfig {
    pub enabled: bool,
    pub routes: Vec<RewriteRouteConfig>,
}

impl Default for DevProxyConfig {
    fn default() -> Self {
        let sooplive_referer =
            BTreeMap::from([("Referer".to_string(), "https://www.sooplive.co.kr/".to_string())]);
        let poong_headers = BTreeMap::from([
            ("Referer".to_string(), "https://poong.today/".to_string()),
            ("Origin".to_string(), "https://poong.today".to_string()),
        ]);

        Self {
            enabled: false,
            routes: vec![
                RewriteRouteConfig::new("/soop-img", "https://profile.img.sooplive.co.kr", BTreeMap::new()),
                RewriteRouteConfig::new("/poong-api", "https://static.poong.today", poong_headers),
                RewriteRouteConfig::new("/soop-live", "https://live.sooplive.co.kr", BTreeMap::new()),
                RewriteRouteConfig::new("/soop-chapi", "https://chapi.sooplive.co.kr", sooplive_referer),
            ],
        }
    }
}

/// A single prefix rewrite: `{prefix}/rest` is forwarded to `{target}/rest`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteRouteConfig {
    /// Local path prefix (must start with `/`).
    pub prefix: String,

    /// Upstream origin the stripped path is appended to.
    pub target: String,

    /// Extra headers required by the upstream host.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RewriteRouteConfig {
    pub fn new(prefix: &str, target: &str, headers: BTreeMap<String, String>) -> Self {
        Self {
            prefix: prefix.to_string(),
            target: target.to_string(),
            headers,
        }
    }
}

/// Roster view configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Base URL of a reachable gateway, used by the CLI.
    pub gateway_url: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}
