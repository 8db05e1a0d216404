//! BDD step definitions for the camera switching feature

use std::sync::Arc;

use cucumber::{given, then, when};

use threat_console::io::HttpClient;
use threat_console::switcher::CameraSwitcher;

use crate::world::{ConsoleWorld, SwitchBehavior};

const SWITCH_URL: &str = "http://backend/switch_camera";

#[given(expr = "{int} camera buttons")]
fn camera_buttons(world: &mut ConsoleWorld, count: usize) {
    world.camera_count = count;
    world.view = None;
}

#[given("a backend that holds switch requests")]
async fn backend_holds(world: &mut ConsoleWorld) {
    *world.backend.switch_behavior.write().await = SwitchBehavior::Hold;
}

#[given("a backend that accepts switch requests")]
async fn backend_accepts(world: &mut ConsoleWorld) {
    *world.backend.switch_behavior.write().await = SwitchBehavior::Accept;
}

#[given("a backend that rejects switch requests")]
async fn backend_rejects(world: &mut ConsoleWorld) {
    *world.backend.switch_behavior.write().await = SwitchBehavior::Reject;
}

#[when(expr = "camera {int} is selected")]
async fn camera_selected(world: &mut ConsoleWorld, index: usize) {
    let http: Arc<dyn HttpClient> = world.backend.clone();
    let switcher = CameraSwitcher::new(http, SWITCH_URL, world.view());
    world.switch_handle = Some(switcher.switch_camera(index).await);
}

#[when("the switch request settles")]
async fn switch_settles(world: &mut ConsoleWorld) {
    let handle = world.switch_handle.take().expect("no camera was selected");
    let joined = handle.await;
    assert!(joined.is_ok(), "switch task panicked: {joined:?}");
    world.switch_result = joined.ok();
}

#[then(expr = "only camera button {int} should be active")]
async fn only_button_active(world: &mut ConsoleWorld, index: usize) {
    let view = world.view();
    let view = view.read().await;
    for (position, button) in view.camera_buttons.iter().enumerate() {
        assert_eq!(
            button.active,
            position == index,
            "button {position} has active={}",
            button.active
        );
    }
}

#[then("the switch request should still be pending")]
async fn switch_pending(world: &mut ConsoleWorld) {
    let handle = world.switch_handle.as_ref().expect("no camera was selected");
    tokio::task::yield_now().await;
    assert!(!handle.is_finished());

    world.backend.release_switch.notify_one();
    let handle = world.switch_handle.take().expect("no camera was selected");
    assert!(handle.await.is_ok());
}

#[then(expr = "the backend should confirm camera {int}")]
fn backend_confirms(world: &mut ConsoleWorld, index: usize) {
    match &world.switch_result {
        Some(Ok(result)) => assert_eq!(result.current_index, index),
        other => panic!("expected a confirmed switch, got {other:?}"),
    }
}

#[then("the switch request should have failed quietly")]
fn switch_failed_quietly(world: &mut ConsoleWorld) {
    match &world.switch_result {
        Some(Err(_)) => {}
        other => panic!("expected a failed switch, got {other:?}"),
    }
}
