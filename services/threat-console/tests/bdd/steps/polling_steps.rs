//! BDD step definitions for the status polling feature

use std::sync::Arc;

use cucumber::{given, then, when};

use threat_console::io::HttpClient;
use threat_console::poller::{PollOutcome, StatusPoller};

use crate::world::ConsoleWorld;

const STATUS_URL: &str = "http://backend/status";

async fn poll(world: &mut ConsoleWorld) -> PollOutcome {
    let http: Arc<dyn HttpClient> = world.backend.clone();
    let poller = StatusPoller::new(http, STATUS_URL, world.view());
    poller.update_status().await
}

async fn script_status(world: &mut ConsoleWorld) {
    let body = world
        .status_body
        .as_ref()
        .map(|b| b.to_string())
        .unwrap_or_default();
    *world.backend.status.write().await = Some(Ok(body));
}

#[given(expr = "a backend reporting {string} in {string} with {int} people and chaos {float}")]
async fn backend_reporting(
    world: &mut ConsoleWorld,
    threat: String,
    color: String,
    people: u32,
    chaos: f64,
) {
    world.status_body = Some(serde_json::json!({
        "threat_level": threat,
        "threat_color": color,
        "reason": "",
        "person_count": people,
        "chaos_metric": chaos,
    }));
    script_status(world).await;
}

#[given(expr = "the reason {string}")]
async fn the_reason(world: &mut ConsoleWorld, reason: String) {
    if let Some(body) = world.status_body.as_mut() {
        body["reason"] = serde_json::Value::String(reason);
    }
    script_status(world).await;
}

#[given("the status has been polled once")]
async fn polled_once(world: &mut ConsoleWorld) {
    let outcome = poll(world).await;
    assert!(
        matches!(outcome, PollOutcome::Applied { .. }),
        "setup poll failed: {outcome:?}"
    );
    world.view_before = Some(world.view().read().await.clone());
}

#[when("the backend becomes unreachable")]
async fn backend_unreachable(world: &mut ConsoleWorld) {
    *world.backend.status.write().await = Some(Err("connection refused".to_string()));
}

#[when(expr = "the backend starts returning {string}")]
async fn backend_returns(world: &mut ConsoleWorld, body: String) {
    *world.backend.status.write().await = Some(Ok(body));
}

#[when("the status is polled")]
async fn status_polled(world: &mut ConsoleWorld) {
    let outcome = poll(world).await;
    world.last_outcome = Some(outcome);
}

#[then(expr = "the threat indicator should read {string} in {string}")]
async fn threat_indicator_reads(world: &mut ConsoleWorld, text: String, color: String) {
    let view = world.view();
    let view = view.read().await;
    assert_eq!(view.threat_indicator.text, text);
    assert_eq!(view.threat_indicator.color, color);
}

#[then(expr = "the reason text should read {string}")]
async fn reason_reads(world: &mut ConsoleWorld, reason: String) {
    assert_eq!(world.view().read().await.reason_text, reason);
}

#[then(expr = "the person count should read {string}")]
async fn person_count_reads(world: &mut ConsoleWorld, count: String) {
    assert_eq!(world.view().read().await.person_count, count);
}

#[then(expr = "the chaos bar should be {string} wide in {string}")]
async fn chaos_bar_is(world: &mut ConsoleWorld, width: String, color: String) {
    let view = world.view();
    let view = view.read().await;
    assert_eq!(view.chaos_bar.width, width);
    assert_eq!(view.chaos_bar.background_color, color);
}

#[then(expr = "the chaos bar color should be {string}")]
async fn chaos_bar_color(world: &mut ConsoleWorld, color: String) {
    assert_eq!(world.view().read().await.chaos_bar.background_color, color);
}

#[then("the poll should have failed")]
fn poll_failed(world: &mut ConsoleWorld) {
    match &world.last_outcome {
        Some(PollOutcome::Failed { .. }) => {}
        other => panic!("expected a failed poll, got {other:?}"),
    }
}

#[then("the view should be unchanged")]
async fn view_unchanged(world: &mut ConsoleWorld) {
    let before = world
        .view_before
        .clone()
        .expect("no snapshot taken before the poll");
    assert_eq!(*world.view().read().await, before);
}
