//! Networking coordinator for wiring the TUI to the scoring client.
//!
//! The TUI event loop is synchronous (crossterm poll-based), so scoring
//! requests run on background tokio tasks and report back through channels:
//!
//! ```text
//! TUI (main thread)  ←── NetEvent ───  tokio background tasks
//!                     ─── NetCommand →
//! ```
//!
//! Every [`NetCommand::Submit`] is executed on its own task, so a slow
//! request never holds up a later one. Which response is applied is decided
//! by the caller from the request id carried in [`NetEvent::Completed`].

use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use taskpilot_proto::api::Endpoint;
use taskpilot_proto::task::Task;

use crate::scoring::{ScoringClient, ScoringError};

/// Commands sent from the TUI main loop to the networking background tasks.
#[derive(Debug)]
pub enum NetCommand {
    /// Post tasks to a scoring endpoint.
    Submit {
        /// Caller-assigned id echoed in the matching event.
        request_id: u64,
        /// Target endpoint.
        endpoint: Endpoint,
        /// Request body.
        tasks: Vec<Task>,
    },
    /// Gracefully shut down the command handler.
    Shutdown,
}

/// Events sent from the networking background tasks to the TUI main loop.
#[derive(Debug)]
pub enum NetEvent {
    /// A request finished, successfully or not.
    Completed {
        /// Id from the originating [`NetCommand::Submit`].
        request_id: u64,
        /// Endpoint the request was sent to.
        endpoint: Endpoint,
        /// Scored tasks or the failure.
        result: Result<Vec<Task>, ScoringError>,
    },
}

/// Default channel capacity for commands and events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration for the networking layer.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Root URL of the scoring backend.
    pub server_url: Url,
    /// Optional per-request timeout.
    pub request_timeout: Option<Duration>,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

impl NetConfig {
    /// Creates a `NetConfig` with no timeout and the default channel capacity.
    #[must_use]
    pub const fn new(server_url: Url) -> Self {
        Self {
            server_url,
            request_timeout: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Spawn the networking command handler and return channel handles.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns [`ScoringError::Client`] if the HTTP client cannot be built.
pub fn spawn_net(
    config: NetConfig,
) -> Result<(mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>), ScoringError> {
    let client = ScoringClient::new(config.server_url.clone(), config.request_timeout)?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<NetCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<NetEvent>(config.channel_capacity);

    tracing::info!(server = %config.server_url, "scoring client ready");
    tokio::spawn(command_handler(client, cmd_rx, evt_tx));

    Ok((cmd_tx, evt_rx))
}

/// Background task: handle commands from the TUI main loop.
async fn command_handler(
    client: ScoringClient,
    mut cmd_rx: mpsc::Receiver<NetCommand>,
    evt_tx: mpsc::Sender<NetEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            NetCommand::Submit {
                request_id,
                endpoint,
                tasks,
            } => {
                let client = client.clone();
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let result = client.submit(endpoint, &tasks).await;
                    match &result {
                        Ok(scored) => {
                            tracing::info!(
                                request_id,
                                %endpoint,
                                count = scored.len(),
                                "scoring request succeeded"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                request_id,
                                %endpoint,
                                error = %e,
                                "scoring request failed"
                            );
                        }
                    }
                    let event = NetEvent::Completed {
                        request_id,
                        endpoint,
                        result,
                    };
                    if evt_tx.send(event).await.is_err() {
                        tracing::debug!(request_id, "event receiver dropped");
                    }
                });
            }
            NetCommand::Shutdown => {
                tracing::info!("net command handler shutting down");
                break;
            }
        }
    }
}
