//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check upstream hosts are absolute http(s) URLs
//! - Detect dev rewrite prefixes that collide with each other or with gateway routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BoardConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::BoardConfig;
use crate::http::RESERVED_PATHS;
use crate::routing::matcher::PathPrefixMatcher;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: '{value}' is not an absolute http(s) URL")]
    InvalidUrl { field: String, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("dev_proxy prefix '{0}' must start with '/'")]
    RelativePrefix(String),

    #[error("dev_proxy prefix '{0}' is declared more than once")]
    DuplicatePrefix(String),

    #[error("dev_proxy prefix '{prefix}' shadows gateway route '{route}'")]
    ShadowsRoute { prefix: String, route: &'static str },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BoardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "upstream.posts_host", &config.upstream.posts_host);
    check_url(&mut errors, "upstream.station_host", &config.upstream.station_host);
    check_url(&mut errors, "upstream.image_host", &config.upstream.image_host);
    check_url(&mut errors, "roster.gateway_url", &config.roster.gateway_url);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.upstream_secs"));
    }

    let mut seen = HashSet::new();
    for (i, route) in config.dev_proxy.routes.iter().enumerate() {
        check_url(&mut errors, &format!("dev_proxy.routes[{i}].target"), &route.target);

        if !route.prefix.starts_with('/') {
            errors.push(ValidationError::RelativePrefix(route.prefix.clone()));
            continue;
        }
        if !seen.insert(route.prefix.trim_end_matches('/')) {
            errors.push(ValidationError::DuplicatePrefix(route.prefix.clone()));
        }
        let matcher = PathPrefixMatcher::new(route.prefix.as_str());
        if let Some(route_path) = RESERVED_PATHS.iter().copied().find(|p| matcher.matches(p)) {
            errors.push(ValidationError::ShadowsRoute {
                prefix: route.prefix.clone(),
                route: route_path,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    let valid = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !valid {
        errors.push(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}
