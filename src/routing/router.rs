//! Rewrite table lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Longest prefix wins, so nested prefixes behave predictably
//! - Explicit no-match rather than silent default

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::RewriteRouteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled prefix rewrite.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub matcher: PathPrefixMatcher,
    pub target: String,
    pub headers: HeaderMap,
}

impl RewriteRule {
    /// Upstream URL for a matched path and optional query string.
    pub fn upstream_url(&self, rest: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.target, rest, q),
            _ => format!("{}{}", self.target, rest),
        }
    }
}

/// Ordered set of rewrite rules.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// Compile routes from configuration. Headers that are not valid HTTP
    /// header names or values are skipped with a warning.
    pub fn from_config(routes: &[RewriteRouteConfig]) -> Self {
        let mut rules: Vec<RewriteRule> = routes
            .iter()
            .map(|route| {
                let mut headers = HeaderMap::new();
                for (name, value) in &route.headers {
                    match (
                        HeaderName::from_bytes(name.as_bytes()),
                        HeaderValue::from_str(value),
                    ) {
                        (Ok(n), Ok(v)) => {
                            headers.insert(n, v);
                        }
                        _ => tracing::warn!(prefix = %route.prefix, header = %name, "Ignoring invalid rewrite header"),
                    }
                }
                RewriteRule {
                    matcher: PathPrefixMatcher::new(route.prefix.as_str()),
                    target: route.target.trim_end_matches('/').to_string(),
                    headers,
                }
            })
            .collect();

        rules.sort_by(|a, b| b.matcher.prefix().len().cmp(&a.matcher.prefix().len()));
        Self { rules }
    }

    /// Find the rule for `path` and the path remainder to forward.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<(&RewriteRule, &'p str)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matcher.strip(path).map(|rest| (rule, rest)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
