//! Mock threat status backend
//!
//! Serves `/status` and `/switch_camera` from a synthetic crowd scene that
//! cycles from calm through density build-up to a surge and back.
//!
//! Usage:
//!   mock_threat_server [--port PORT]
//!
//! The port can also be set via the MOCK_THREAT_PORT environment variable.
//! Command line argument takes precedence over environment variable.
//! Default port is 5000 (same as the camera backend).

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use threat_console::mock::{build_router, new_mock_handle, SceneSample};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mock_threat_server")]
#[command(about = "Mock crowd threat status backend")]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Milliseconds between scene updates
    #[arg(long, default_value_t = 250)]
    scene_interval_ms: u64,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

/// Scene `step` of a repeating 80-step script
fn scripted_scene(step: u64) -> SceneSample {
    let phase = step % 80;
    match phase {
        // calm, a few people drifting around
        0..=19 => SceneSample {
            person_count: 2 + (phase % 3) as u32,
            moving_count: 1,
            avg_crowd_speed: 3.0 + (phase % 5) as f64,
        },
        // crowd builds up
        20..=39 => SceneSample {
            person_count: 5 + (phase - 20) as u32 / 2,
            moving_count: 2,
            avg_crowd_speed: 6.0,
        },
        // surge
        40..=59 => SceneSample {
            person_count: 12,
            moving_count: 8,
            avg_crowd_speed: 10.0 + (phase - 40) as f64,
        },
        // dispersal
        _ => SceneSample {
            person_count: 10u32.saturating_sub((phase - 60) as u32 / 2),
            moving_count: 3,
            avg_crowd_speed: 12.0,
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    // Port priority: command line arg > environment variable > default (5000)
    let port = args
        .port
        .or_else(|| {
            std::env::var("MOCK_THREAT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(5000u16);

    let state = new_mock_handle();

    let scene_state = Arc::clone(&state);
    let scene_interval = Duration::from_millis(args.scene_interval_ms.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(scene_interval);
        let mut step = 0u64;
        loop {
            ticker.tick().await;
            let mut backend = scene_state.write().await;
            backend.observe(scripted_scene(step));
            tracing::debug!(
                "Scene step {}: {} ({} people, chaos {})",
                step,
                backend.status.threat_level,
                backend.status.person_count,
                backend.status.chaos_metric
            );
            step += 1;
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Mock threat server listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Mock threat server shutting down");
        })
        .await?;

    Ok(())
}
