//! Roster View end to end: mock upstream → gateway → GatewayClient → render.

use crew_board::roster::{fetch_live, FileMount, GatewayClient, LookupOutcome, RosterView, CREWS};
use crew_board::upstream::FetchError;

mod common;

use common::MockResponse;

fn station_responder(target: &str) -> MockResponse {
    match target {
        "/api/yuambo/station" => MockResponse::json(
            r#"{"broad":{"broad_no":281234567,"broad_title":"<b>hi</b>","current_sum_viewer":"1200"}}"#,
        ),
        "/api/sladk51/station" => MockResponse::bytes("text/html", b"<html>oops</html>"),
        _ => MockResponse::json(r#"{"station":{},"broad":null}"#),
    }
}

#[tokio::test]
async fn gateway_client_reads_station_and_posts() {
    let (upstream, _) = common::start_mock_backend(MockResponse::json(r#"{"broad":null}"#)).await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;
    let client = GatewayClient::new(&format!("{}/", gateway.base()));
    assert_eq!(client.base(), gateway.base());

    let station = client.station("yuambo").await.unwrap();
    assert!(station["broad"].is_null());
    let posts = client.posts("yuambo").await.unwrap();
    assert!(posts.is_object());
}

#[tokio::test]
async fn gateway_client_thumbnail_errors_on_failure() {
    let gateway = common::start_gateway(common::config_for(common::closed_addr().await)).await;
    let client = GatewayClient::new(&gateway.base());

    let err = client.thumbnail("1").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn live_pass_through_gateway_tolerates_failures() {
    let (upstream, recorder) = common::start_programmable_backend(station_responder).await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;
    let client = GatewayClient::new(&gateway.base());

    let snapshot = fetch_live(CREWS, &client).await;

    let live = snapshot.table.get("yuambo").unwrap();
    assert_eq!(live.title, "<b>hi</b>");
    assert_eq!(live.viewer_count, 1200);
    assert_eq!(snapshot.table.len(), 1);

    // The gateway turns the non-JSON body into a 500; the lookup records it.
    let failed = snapshot.lookups.iter().find(|l| l.id == "sladk51").unwrap();
    assert!(matches!(failed.outcome, LookupOutcome::Failed(FetchError::Transport(_))));
    assert_eq!(snapshot.failed_count(), 1);
    let offline = snapshot.lookups.iter().find(|l| l.id == "jaeha010").unwrap();
    assert!(matches!(offline.outcome, LookupOutcome::Offline));

    let unique: std::collections::HashSet<_> =
        CREWS.iter().flat_map(|c| c.members.iter().map(|m| m.id)).collect();
    assert_eq!(recorder.requests().len(), unique.len());
    assert_eq!(snapshot.lookups.len(), unique.len());
}

#[tokio::test]
async fn failing_upstream_counts_every_lookup_as_failed() {
    let gateway = common::start_gateway(common::config_for(common::closed_addr().await)).await;
    let client = GatewayClient::new(&gateway.base());

    let snapshot = fetch_live(CREWS, &client).await;

    assert!(snapshot.table.is_empty());
    assert!(!snapshot.lookups.is_empty());
    assert_eq!(snapshot.failed_count(), snapshot.lookups.len());

    // The printing path still hands back the gateway's error body.
    let body = client.station("yuambo").await.unwrap();
    assert_eq!(body["error"], "fetch failed");
}

#[tokio::test]
async fn unreachable_gateway_renders_everyone_offline() {
    let client = GatewayClient::new(&format!("http://{}", common::closed_addr().await));
    let snapshot = fetch_live(CREWS, &client).await;

    assert!(snapshot.table.is_empty());
    assert_eq!(snapshot.failed_count(), snapshot.lookups.len());
}

#[tokio::test]
async fn render_command_writes_board_file() {
    let (upstream, _) = common::start_programmable_backend(station_responder).await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;

    let path = std::env::temp_dir().join(format!("crew-board-{}.html", uuid::Uuid::new_v4()));
    let view = RosterView::new(CREWS, GatewayClient::new(&gateway.base()));
    let snapshot = view.init(&mut FileMount::new(&path)).await.unwrap();

    assert_eq!(snapshot.table.len(), 1);
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(!html.contains("<b>hi</b>"));
    std::fs::remove_file(&path).unwrap_or_default();
}
