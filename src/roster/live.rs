//! Live-status aggregation.
//!
//! One pass walks every crew, dedupes members by identity (first occurrence
//! keeps its position), fans out one station lookup per identity, waits for
//! the whole batch to settle, and folds the results into a [`LiveTable`].
//! A failed lookup never aborts or delays the others.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::Value;

use crate::observability::metrics;
use crate::roster::data::{Crew, Member};
use crate::upstream::{FetchError, UpstreamClient};

/// Live overlay for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveStatus {
    pub is_live: bool,
    pub title: String,
    pub viewer_count: u64,
}

/// Snapshot of who is live. An absent identity renders as offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LiveTable(BTreeMap<String, LiveStatus>);

impl LiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, status: LiveStatus) {
        self.0.insert(id.into(), status);
    }

    pub fn get(&self, id: &str) -> Option<&LiveStatus> {
        self.0.get(id)
    }

    pub fn is_live(&self, id: &str) -> bool {
        self.get(id).map(|s| s.is_live).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LiveStatus)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Result of a single station lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Live(LiveStatus),
    /// The lookup succeeded and the member is not broadcasting.
    Offline,
    /// The lookup failed; the member is treated as offline.
    Failed(FetchError),
}

impl LookupOutcome {
    fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Live(_) => "live",
            LookupOutcome::Offline => "offline",
            LookupOutcome::Failed(_) => "failed",
        }
    }
}

/// Per-identity record of what the aggregation pass saw.
#[derive(Debug)]
pub struct Lookup {
    pub id: &'static str,
    pub outcome: LookupOutcome,
}

/// Output of [`fetch_live`]: the merged table plus every individual outcome.
#[derive(Debug, Default)]
pub struct LiveSnapshot {
    pub table: LiveTable,
    pub lookups: Vec<Lookup>,
}

impl LiveSnapshot {
    pub fn failed_count(&self) -> usize {
        self.lookups
            .iter()
            .filter(|l| matches!(l.outcome, LookupOutcome::Failed(_)))
            .count()
    }
}

/// Something that can answer a station lookup for an identity.
pub trait StationSource {
    fn station(&self, id: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

impl StationSource for UpstreamClient {
    async fn station(&self, id: &str) -> Result<Value, FetchError> {
        let body = self.station_info(id).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Members of all crews in declaration order, deduplicated by identity.
pub fn unique_members(crews: &[Crew]) -> Vec<&'static Member> {
    let mut seen = HashSet::new();
    crews
        .iter()
        .flat_map(|crew| crew.members.iter())
        .filter(|m| seen.insert(m.id))
        .collect()
}

/// Extract a live overlay from a station response.
///
/// Live means `broad.broad_no` is present and truthy (nonzero number,
/// non-empty string). Title and viewer count default to empty and zero.
pub fn parse_station(body: &Value) -> Option<LiveStatus> {
    let broad = body.get("broad")?;
    if !broad.get("broad_no").map(is_truthy).unwrap_or(false) {
        return None;
    }

    let title = broad
        .get("broad_title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let viewer_count = broad.get("current_sum_viewer").and_then(as_count).unwrap_or(0);

    Some(LiveStatus {
        is_live: true,
        title,
        viewer_count,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Classify one lookup result.
pub fn classify(result: Result<Value, FetchError>) -> LookupOutcome {
    match result {
        Ok(body) => match parse_station(&body) {
            Some(status) => LookupOutcome::Live(status),
            None => LookupOutcome::Offline,
        },
        Err(e) => LookupOutcome::Failed(e),
    }
}

/// Run one aggregation pass over `crews` using `source`.
///
/// All lookups run concurrently with no cap; the pass completes when every
/// lookup has settled.
pub async fn fetch_live<S>(crews: &[Crew], source: &S) -> LiveSnapshot
where
    S: StationSource + Sync,
{
    let members = unique_members(crews);
    tracing::debug!(lookups = members.len(), "Fetching live status");

    let results = join_all(members.iter().map(|m| async move {
        let outcome = classify(source.station(m.id).await);
        Lookup { id: m.id, outcome }
    }))
    .await;

    let mut snapshot = LiveSnapshot::default();
    for lookup in results {
        metrics::record_live_lookup(lookup.outcome.label());
        match &lookup.outcome {
            LookupOutcome::Live(status) => snapshot.table.insert(lookup.id, status.clone()),
            LookupOutcome::Offline => {}
            LookupOutcome::Failed(e) => {
                tracing::debug!(id = lookup.id, error = %e, "Live lookup failed, treating as offline");
            }
        }
        snapshot.lookups.push(lookup);
    }

    tracing::info!(
        live = snapshot.table.len(),
        failed = snapshot.failed_count(),
        "Live status pass settled"
    );
    snapshot
}
