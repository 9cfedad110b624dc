//! Two-phase board initialization.

use std::io;

use crate::roster::data::Crew;
use crate::roster::live::{fetch_live, LiveSnapshot, LiveTable, StationSource};
use crate::roster::mount::Mount;
use crate::roster::render::render;

/// Binds a roster to a station source.
pub struct RosterView<S> {
    crews: &'static [Crew],
    source: S,
}

impl<S: StationSource + Sync> RosterView<S> {
    pub fn new(crews: &'static [Crew], source: S) -> Self {
        Self { crews, source }
    }

    /// Render everyone offline, run one aggregation pass, render again with
    /// the result. Calling it again reuses the mount and repeats the lookups.
    pub async fn init<M: Mount>(&self, mount: &mut M) -> io::Result<LiveSnapshot> {
        mount.replace(&render(self.crews, &LiveTable::new()))?;
        self.refresh(mount).await
    }

    /// One aggregation pass followed by a single render.
    pub async fn refresh<M: Mount>(&self, mount: &mut M) -> io::Result<LiveSnapshot> {
        let snapshot = fetch_live(self.crews, &self.source).await;
        mount.replace(&render(self.crews, &snapshot.table))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::data::CREWS;
    use crate::roster::mount::MemoryMount;
    use crate::upstream::FetchError;
    use serde_json::{json, Value};

    struct OnlyBossLive;

    impl StationSource for OnlyBossLive {
        async fn station(&self, id: &str) -> Result<Value, FetchError> {
            if id == "yuambo" {
                Ok(json!({"broad": {"broad_no": 1, "broad_title": "hello", "current_sum_viewer": 9}}))
            } else {
                Ok(json!({"broad": null}))
            }
        }
    }

    struct Unreachable;

    impl StationSource for Unreachable {
        async fn station(&self, _id: &str) -> Result<Value, FetchError> {
            Err(FetchError::InvalidJson(serde_json::from_str::<Value>("").unwrap_err()))
        }
    }

    #[tokio::test]
    async fn renders_offline_then_live() {
        let view = RosterView::new(CREWS, OnlyBossLive);
        let mut mount = MemoryMount::new();
        let snapshot = view.init(&mut mount).await.unwrap();

        assert_eq!(mount.frames().len(), 2);
        assert_eq!(mount.frames()[0], render(CREWS, &LiveTable::new()));
        assert!(!mount.frames()[0].contains("live-ring"));
        assert!(mount.frames()[1].contains("<div class=\"live-title\">hello</div>"));
        assert_eq!(snapshot.table.get("yuambo").unwrap().viewer_count, 9);
    }

    #[tokio::test]
    async fn tolerates_an_empty_pass() {
        let view = RosterView::new(CREWS, Unreachable);
        let mut mount = MemoryMount::new();
        view.init(&mut mount).await.unwrap();

        assert_eq!(mount.frames()[0], mount.frames()[1]);
        let members: usize = CREWS.iter().map(|c| c.members.len()).sum();
        let frame = mount.current().unwrap();
        let rendered = frame.matches("class=\"mem\"").count() + frame.matches("class=\"cr-boss\"").count();
        assert_eq!(rendered, members);
    }

    #[tokio::test]
    async fn repeated_init_reuses_mount() {
        let view = RosterView::new(CREWS, OnlyBossLive);
        let mut mount = MemoryMount::new();
        view.init(&mut mount).await.unwrap();
        view.init(&mut mount).await.unwrap();
        assert_eq!(mount.frames().len(), 4);
        assert_eq!(mount.frames()[1], mount.frames()[3]);
    }
}
