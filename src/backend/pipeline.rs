//! Chat pipeline connecting the UI to the backend REST API
//!
//! Provides a channel-based interface: the UI sends [`ChatCommand`]s and
//! polls [`ChatEvent`]s each frame. A single worker thread owns the session
//! id and drives the HTTP client, so at most one exchange is in flight.

use crate::backend::client::BackendClient;
use crate::backend::types::ChatReply;
use crate::config::AppConfig;
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands accepted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Request a new session id from the backend
    FetchSession,

    /// Exchange one message within the current session
    Send {
        /// The user's text, already trimmed and non-empty
        text: String,
        /// Voice to synthesize the reply with
        voice_id: Option<String>,
        /// Unique request id for correlating the reply
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Session bootstrap succeeded
    SessionReady(String),

    /// Session bootstrap failed; chat stays blocked until a retry succeeds
    SessionFailed(String),

    /// An exchange completed
    Reply {
        request_id: Uuid,
        reply: ChatReply,
    },

    /// An exchange failed
    Failed {
        request_id: Uuid,
        error: String,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Chat pipeline with channel-based communication
pub struct ChatPipeline {
    config: AppConfig,
    command_tx: Sender<ChatCommand>,
    command_rx: Receiver<ChatCommand>,
    event_tx: Sender<ChatEvent>,
    event_rx: Receiver<ChatEvent>,
}

impl ChatPipeline {
    /// Create a new chat pipeline
    pub fn new(config: AppConfig) -> Self {
        let (command_tx, command_rx) = bounded(config.channel_capacity);
        let (event_tx, event_rx) = bounded(config.channel_capacity);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<ChatCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    ///
    /// The worker owns the session id: `FetchSession` establishes it and
    /// `Send` refuses to issue a network call until it exists.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Chat pipeline worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(ChatEvent::SessionFailed(format!(
                        "runtime creation failed: {e}"
                    )));
                    let _ = event_tx.send(ChatEvent::Shutdown);
                    return;
                }
            };

            let client = BackendClient::new(
                config.backend_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            );
            let mut session_id: Option<String> = None;

            info!("Chat pipeline worker ready");

            loop {
                match command_rx.recv() {
                    Ok(ChatCommand::FetchSession) => {
                        debug!("Fetching session from {}", config.backend_url);
                        match runtime.block_on(client.new_session()) {
                            Ok(id) => {
                                session_id = Some(id.clone());
                                let _ = event_tx.send(ChatEvent::SessionReady(id));
                            }
                            Err(e) => {
                                error!("Session bootstrap failed: {}", e);
                                session_id = None;
                                let _ = event_tx.send(ChatEvent::SessionFailed(e.to_string()));
                            }
                        }
                    }

                    Ok(ChatCommand::Send {
                        text,
                        voice_id,
                        request_id,
                    }) => {
                        let Some(session) = session_id.as_deref() else {
                            let _ = event_tx.send(ChatEvent::Failed {
                                request_id,
                                error: "no session established".to_string(),
                            });
                            continue;
                        };

                        debug!("Processing exchange {}", request_id);
                        let start = Instant::now();

                        match runtime.block_on(client.chat(session, &text, voice_id.as_deref())) {
                            Ok(response) => {
                                let round_trip_ms = start.elapsed().as_millis() as u64;
                                debug!(
                                    "Exchange {} complete: {} chars in {}ms",
                                    request_id,
                                    response.response.len(),
                                    round_trip_ms
                                );
                                let _ = event_tx.send(ChatEvent::Reply {
                                    request_id,
                                    reply: ChatReply {
                                        question: text,
                                        text: response.response,
                                        audio_url: response.audio_url,
                                        round_trip_ms,
                                    },
                                });
                            }
                            Err(e) => {
                                error!("Exchange {} failed: {}", request_id, e);
                                let _ = event_tx.send(ChatEvent::Failed {
                                    request_id,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(ChatCommand::Shutdown) => {
                        info!("Chat pipeline worker shutting down");
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Chat pipeline worker stopped");
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let pipeline = ChatPipeline::new(AppConfig::default());

        // Verify channels are created
        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_send_without_session_fails() {
        // A worker with no session must refuse the exchange without touching
        // the network.
        let pipeline = ChatPipeline::new(
            AppConfig::default().with_backend_url("http://127.0.0.1:1"),
        );
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        pipeline.start_worker().unwrap();

        let request_id = Uuid::new_v4();
        command_tx
            .send(ChatCommand::Send {
                text: "Hola".to_string(),
                voice_id: None,
                request_id,
            })
            .unwrap();

        match event_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            ChatEvent::Failed { request_id: id, error } => {
                assert_eq!(id, request_id);
                assert!(error.contains("no session"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let _ = command_tx.send(ChatCommand::Shutdown);
    }

    #[test]
    fn test_session_failure_is_reported() {
        // Nothing listens on port 1, so the bootstrap must surface a failure
        // event rather than leave the session silently empty.
        let pipeline = ChatPipeline::new(
            AppConfig::default()
                .with_backend_url("http://127.0.0.1:1")
                .with_timeout_secs(1),
        );
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        pipeline.start_worker().unwrap();

        command_tx.send(ChatCommand::FetchSession).unwrap();

        match event_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            ChatEvent::SessionFailed(_) => {}
            other => panic!("unexpected event: {other:?}"),
        }

        let _ = command_tx.send(ChatCommand::Shutdown);
    }
}
