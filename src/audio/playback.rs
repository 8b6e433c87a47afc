//! Playback pipeline for remote audio
//!
//! Channel-based worker mirroring the chat pipeline: the UI sends
//! [`PlaybackCommand`]s and polls [`PlaybackEvent`]s. One clip plays at a
//! time; a new `Play` replaces whatever is playing.

use crate::config::AppConfig;
use crate::{HablaError, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Commands accepted by the playback pipeline
#[derive(Debug, Clone)]
pub enum PlaybackCommand {
    /// Download and play an audio resource
    Play {
        /// URL of the audio resource
        url: String,
        /// Message the audio belongs to
        message_id: Uuid,
    },

    /// Stop the current clip, if any
    Stop,

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the playback pipeline
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// A clip started playing
    Started { message_id: Uuid },

    /// The current clip finished or was stopped
    Finished { message_id: Uuid },

    /// Download, decode, or device failure
    Failed { message_id: Uuid, error: String },

    /// Pipeline has shut down
    Shutdown,
}

/// Playback pipeline with channel-based communication
pub struct PlaybackPipeline {
    config: AppConfig,
    command_tx: Sender<PlaybackCommand>,
    command_rx: Receiver<PlaybackCommand>,
    event_tx: Sender<PlaybackEvent>,
    event_rx: Receiver<PlaybackEvent>,
}

impl PlaybackPipeline {
    /// Create a new playback pipeline
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
    pub fn command_sender(&self) -> Sender<PlaybackCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<PlaybackEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    ///
    /// The output stream is opened inside the worker because it is not
    /// `Send`. A missing output device turns every `Play` into a `Failed`
    /// event; the application stays interactive.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Playback worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(PlaybackEvent::Shutdown);
                    return;
                }
            };

            let output = OutputStream::try_default();
            if let Err(e) = &output {
                warn!("No audio output device: {}", e);
            }

            let timeout = Duration::from_secs(config.request_timeout_secs);
            let client = reqwest::Client::new();

            info!("Playback worker ready");

            // A command observed while a clip was playing is handled on the
            // next iteration instead of being dropped.
            let mut pending: Option<PlaybackCommand> = None;

            loop {
                let command = match pending.take() {
                    Some(command) => command,
                    None => match command_rx.recv() {
                        Ok(command) => command,
                        Err(e) => {
                            error!("Command channel error: {}", e);
                            break;
                        }
                    },
                };

                match command {
                    PlaybackCommand::Play { url, message_id } => {
                        let Ok((_stream, handle)) = &output else {
                            let _ = event_tx.send(PlaybackEvent::Failed {
                                message_id,
                                error: "no audio output device".to_string(),
                            });
                            continue;
                        };

                        debug!("Playing audio for message {}", message_id);

                        let sink = match start_clip(&runtime, &client, handle, &url, timeout) {
                            Ok(sink) => sink,
                            Err(e) => {
                                error!("Playback failed: {}", e);
                                let _ = event_tx.send(PlaybackEvent::Failed {
                                    message_id,
                                    error: e.user_message(),
                                });
                                continue;
                            }
                        };

                        let _ = event_tx.send(PlaybackEvent::Started { message_id });

                        // Watch for commands while the clip plays
                        while !sink.empty() {
                            match command_rx.recv_timeout(Duration::from_millis(50)) {
                                Ok(PlaybackCommand::Stop) => {
                                    sink.stop();
                                }
                                Ok(command) => {
                                    sink.stop();
                                    pending = Some(command);
                                }
                                Err(RecvTimeoutError::Timeout) => {}
                                Err(RecvTimeoutError::Disconnected) => {
                                    sink.stop();
                                }
                            }
                        }

                        let _ = event_tx.send(PlaybackEvent::Finished { message_id });
                    }

                    PlaybackCommand::Stop => {
                        // Nothing playing
                    }

                    PlaybackCommand::Shutdown => {
                        info!("Playback worker shutting down");
                        let _ = event_tx.send(PlaybackEvent::Shutdown);
                        break;
                    }
                }
            }

            info!("Playback worker stopped");
        });

        Ok(())
    }
}

/// Download a clip and start it on a fresh sink.
fn start_clip(
    runtime: &Runtime,
    client: &reqwest::Client,
    handle: &OutputStreamHandle,
    url: &str,
    timeout: Duration,
) -> Result<Sink> {
    let bytes = runtime.block_on(async {
        let response = client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| HablaError::PlaybackError(format!("download failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HablaError::PlaybackError(format!(
                "audio host returned {status}"
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| HablaError::PlaybackError(format!("download failed: {e}")))
    })?;

    let source = Decoder::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| HablaError::PlaybackError(format!("undecodable audio: {e}")))?;

    let sink = Sink::try_new(handle)
        .map_err(|e| HablaError::PlaybackError(format!("output device error: {e}")))?;
    sink.append(source);

    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let pipeline = PlaybackPipeline::new(AppConfig::default());

        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_unreachable_url_reports_failure() {
        // Works with or without an audio device: either the device is
        // missing or the download fails, and both surface as Failed.
        let pipeline = PlaybackPipeline::new(
            AppConfig::default().with_timeout_secs(1),
        );
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        pipeline.start_worker().unwrap();

        let message_id = Uuid::new_v4();
        command_tx
            .send(PlaybackCommand::Play {
                url: "http://127.0.0.1:1/clip.mp3".to_string(),
                message_id,
            })
            .unwrap();

        match event_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            PlaybackEvent::Failed { message_id: id, .. } => assert_eq!(id, message_id),
            other => panic!("unexpected event: {other:?}"),
        }

        let _ = command_tx.send(PlaybackCommand::Shutdown);
    }
}
