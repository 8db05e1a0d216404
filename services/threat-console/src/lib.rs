//! Threat Console - crowd threat status console
//!
//! Polls a camera backend for its threat status, renders it into a dashboard
//! view, and forwards camera switch commands typed by the operator.

pub mod config;
pub mod error;
pub mod io;
pub mod mock;
pub mod poller;
pub mod scheduler;
pub mod status;
pub mod switcher;
pub mod view;

pub use config::{load_config, Config};
pub use error::{ConsoleError, Result};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::poller::StatusPoller;
use crate::scheduler::PollScheduler;
use crate::switcher::CameraSwitcher;
use crate::view::ViewHandle;

/// A command typed at the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchCamera(usize),
    Quit,
}

/// Parse one console line. Blank lines and unknown input yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => line.parse().ok().map(Command::SwitchCamera),
    }
}

/// All the wired-up parts of a running console
pub struct Console {
    pub view: ViewHandle,
    pub poller: Arc<StatusPoller>,
    pub switcher: CameraSwitcher,
    pub cancel: CancellationToken,
    config: Config,
}

impl Console {
    /// Wire the console against the given HTTP client
    pub fn new(config: Config, http: Arc<dyn HttpClient>) -> Self {
        let view = view::new_view_handle(config.cameras.count);
        let poller = Arc::new(
            StatusPoller::new(
                Arc::clone(&http),
                config.server.status_url(),
                Arc::clone(&view),
            )
            .with_discard_stale(config.polling.discard_stale_responses),
        );
        let switcher = CameraSwitcher::new(
            http,
            config.server.switch_camera_url(),
            Arc::clone(&view),
        );

        Self {
            view,
            poller,
            switcher,
            cancel: CancellationToken::new(),
            config,
        }
    }

    /// Poll, render and accept command lines from `input` until cancelled.
    ///
    /// A closed input channel stops command handling; polling continues
    /// until the cancellation token fires.
    pub async fn run(&self, input: mpsc::Receiver<String>) {
        let scheduler = PollScheduler::new(
            Arc::clone(&self.poller),
            self.config.polling.interval(),
            self.cancel.clone(),
        );

        tracing::info!(
            "Polling {} every {:?}",
            self.config.server.status_url(),
            self.config.polling.interval()
        );

        tokio::join!(scheduler.run(), self.render_loop(), self.command_loop(input));
    }

    async fn command_loop(&self, mut input: mpsc::Receiver<String>) {
        loop {
            let line = tokio::select! {
                line = input.recv() => line,
                _ = self.cancel.cancelled() => return,
            };

            match line {
                Some(line) => match parse_command(&line) {
                    Some(Command::SwitchCamera(index)) => {
                        tracing::debug!("Switching to camera {}", index);
                        let _ = self.switcher.switch_camera(index).await;
                    }
                    Some(Command::Quit) => {
                        tracing::info!("Quit requested");
                        self.cancel.cancel();
                        return;
                    }
                    None if line.trim().is_empty() => {}
                    None => tracing::warn!("Unrecognized command: {:?}", line.trim()),
                },
                None => {
                    tracing::debug!("Console input closed");
                    return;
                }
            }
        }
    }

    async fn render_loop(&self) {
        let mut ticker = tokio::time::interval(self.config.polling.interval());
        let mut last_revision = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.cancel.cancelled() => return,
            }

            let view = self.view.read().await;
            if view.revision != last_revision {
                last_revision = view.revision;
                tracing::info!("{}", view.render());
            }
        }
    }
}

/// Read stdin lines on a dedicated thread and forward them over a channel.
///
/// A blocking stdin read cannot be cancelled, so it must not live on the
/// runtime's blocking pool: shutting the runtime down would wait for the
/// next line. The thread ends at end of input, on a read error, or once the
/// receiver is gone.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    let spawned = std::thread::Builder::new()
        .name("console-stdin".to_string())
        .spawn(move || {
            use std::io::BufRead;
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read console input: {}", e);
                        break;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("Failed to start console input thread: {}", e);
    }
    rx
}

/// Run the console with the given configuration, reading commands from stdin
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let console = Console::new(config, http);

    let cancel_for_signal = console.cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    console.run(spawn_stdin_reader()).await;
    tracing::info!("Threat console stopped");

    Ok(())
}
