//! Application state management
//!
//! The central mutable state for the Habla UI. Handlers mutate it through
//! explicit methods; worker outcomes arrive as events consumed by
//! [`AppState::poll_events`] once per frame, never as ambient side effects.

use crate::audio::{PlaybackCommand, PlaybackEvent};
use crate::backend::{ChatCommand, ChatEvent, SessionState};
use crate::config::AppConfig;
use crate::messages::{Message, MessageStore, FALLBACK_ERROR_TEXT};
use crate::voices::{CatalogEvent, Voice};
use crossbeam_channel::{Receiver, Sender};
use std::collections::VecDeque;
use uuid::Uuid;

/// Alert text shown when the user submits an empty message.
pub const EMPTY_INPUT_NOTICE: &str = "Type a question first.";

/// The exchange currently in flight, at most one at a time
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub request_id: Uuid,
    /// The trimmed text, echoed into the conversation once the reply arrives
    pub text: String,
}

/// Lifecycle of the voice catalog fetch
#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Loaded(Vec<Voice>),
    Failed(String),
}

impl CatalogState {
    pub fn voices(&self) -> &[Voice] {
        match self {
            CatalogState::Loaded(voices) => voices,
            _ => &[],
        }
    }
}

/// A blocking dialog with a single dismiss action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Diagnostics displayed in the debug panel
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    /// Round-trip of the last completed exchange in milliseconds
    pub last_round_trip_ms: Option<u64>,
    /// Current frame rate
    pub fps: f32,
    /// Recent log messages
    pub log_messages: VecDeque<String>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self {
            log_messages: VecDeque::with_capacity(100),
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, message: String) {
        if self.log_messages.len() >= 100 {
            self.log_messages.pop_front();
        }
        self.log_messages.push_back(message);
    }
}

/// Central application state
pub struct AppState {
    /// Conversation history (thread-safe, append-only)
    pub messages: MessageStore,

    /// Current text input
    pub input_text: String,

    /// Backend session lifecycle
    pub session: SessionState,

    /// The exchange in flight, if any
    pub pending_send: Option<PendingSend>,

    /// Voice catalog fetch state
    pub catalog: CatalogState,

    /// Voice included in exchange requests
    pub selected_voice_id: String,

    /// Whether received audio plays without explicit request
    pub auto_play: bool,

    /// Whether the voice picker dialog is open
    pub show_voice_picker: bool,

    /// Whether to show the debug panel
    pub show_debug_panel: bool,

    /// Modal alert (validation and playback failures)
    pub alert: Option<Alert>,

    /// Message whose audio is currently playing
    pub playing_message: Option<Uuid>,

    /// Debug information
    pub debug_info: DebugInfo,

    /// Channel to send chat commands
    pub chat_command_tx: Option<Sender<ChatCommand>>,

    /// Channel to receive chat events
    pub chat_event_rx: Option<Receiver<ChatEvent>>,

    /// Channel to receive the voice catalog outcome
    pub catalog_event_rx: Option<Receiver<CatalogEvent>>,

    /// Channel to send playback commands
    pub playback_command_tx: Option<Sender<PlaybackCommand>>,

    /// Channel to receive playback events
    pub playback_event_rx: Option<Receiver<PlaybackEvent>>,

    /// Frame time tracking for FPS
    frame_times: VecDeque<f64>,
}

impl AppState {
    /// Create a new application state from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            messages: MessageStore::new(),
            input_text: String::new(),
            session: SessionState::Pending,
            pending_send: None,
            catalog: CatalogState::Loading,
            selected_voice_id: config.default_voice_id.clone(),
            auto_play: config.auto_play,
            show_voice_picker: false,
            show_debug_panel: false,
            alert: None,
            playing_message: None,
            debug_info: DebugInfo::new(),
            chat_command_tx: None,
            chat_event_rx: None,
            catalog_event_rx: None,
            playback_command_tx: None,
            playback_event_rx: None,
            frame_times: VecDeque::with_capacity(60),
        }
    }

    /// Update FPS calculation
    pub fn update_fps(&mut self, delta_time: f64) {
        self.frame_times.push_back(delta_time);
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if !self.frame_times.is_empty() {
            let avg_time: f64 =
                self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
            self.debug_info.fps = if avg_time > 0.0 { 1.0 / avg_time as f32 } else { 0.0 };
        }
    }

    /// Whether a submit would currently be accepted
    pub fn can_submit(&self) -> bool {
        self.session.is_ready()
            && self.pending_send.is_none()
            && !self.input_text.trim().is_empty()
    }

    /// Submit the current input as a chat exchange.
    ///
    /// Empty or whitespace-only input is rejected locally with a validation
    /// alert and no network call. Submits are also refused while a send is
    /// pending or before a session exists; both states are visible in the UI
    /// and keep the affordance disabled.
    pub fn submit(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            self.alert = Some(Alert::new("Nothing to send", EMPTY_INPUT_NOTICE));
            return;
        }

        if self.pending_send.is_some() || !self.session.is_ready() {
            return;
        }

        let Some(tx) = &self.chat_command_tx else {
            return;
        };

        let request_id = Uuid::new_v4();
        let _ = tx.send(ChatCommand::Send {
            text: text.clone(),
            voice_id: Some(self.selected_voice_id.clone()),
            request_id,
        });

        self.pending_send = Some(PendingSend { request_id, text });
        self.input_text.clear();
    }

    /// Re-request a session after a failed bootstrap
    pub fn retry_session(&mut self) {
        if let Some(tx) = &self.chat_command_tx {
            self.session = SessionState::Pending;
            self.debug_info.add_log("Retrying session bootstrap".to_string());
            let _ = tx.send(ChatCommand::FetchSession);
        }
    }

    /// Toggle automatic playback of received audio
    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        self.debug_info.add_log(format!(
            "Auto-play {}",
            if self.auto_play { "enabled" } else { "disabled" }
        ));
    }

    /// Pick a voice from the catalog.
    ///
    /// Updates the stored selection and closes the dialog; no network call.
    pub fn select_voice(&mut self, voice_id: impl Into<String>) {
        self.selected_voice_id = voice_id.into();
        self.show_voice_picker = false;
        self.debug_info
            .add_log(format!("Voice selected: {}", self.selected_voice_id));
    }

    /// Request playback of a message's audio
    pub fn play_message(&mut self, message: &Message) {
        let Some(url) = &message.audio_url else {
            return;
        };
        self.request_playback(message.id, url.clone());
    }

    /// Stop the clip currently playing
    pub fn stop_playback(&mut self) {
        if let Some(tx) = &self.playback_command_tx {
            let _ = tx.send(PlaybackCommand::Stop);
        }
    }

    fn request_playback(&mut self, message_id: Uuid, url: String) {
        if let Some(tx) = &self.playback_command_tx {
            let _ = tx.send(PlaybackCommand::Play { url, message_id });
        }
    }

    /// Process incoming events from worker channels
    pub fn poll_events(&mut self) {
        // Chat events
        let chat_events: Vec<ChatEvent> = if let Some(rx) = &self.chat_event_rx {
            rx.try_iter().collect()
        } else {
            Vec::new()
        };
        for event in chat_events {
            self.handle_chat_event(event);
        }

        // Catalog outcome
        let catalog_events: Vec<CatalogEvent> = if let Some(rx) = &self.catalog_event_rx {
            rx.try_iter().collect()
        } else {
            Vec::new()
        };
        for event in catalog_events {
            match event {
                CatalogEvent::Loaded(voices) => {
                    self.debug_info
                        .add_log(format!("Voice catalog loaded ({} voices)", voices.len()));
                    self.catalog = CatalogState::Loaded(voices);
                }
                CatalogEvent::Failed(reason) => {
                    self.debug_info
                        .add_log(format!("Voice catalog failed: {reason}"));
                    self.catalog = CatalogState::Failed(reason);
                }
            }
        }

        // Playback events
        let playback_events: Vec<PlaybackEvent> = if let Some(rx) = &self.playback_event_rx {
            rx.try_iter().collect()
        } else {
            Vec::new()
        };
        for event in playback_events {
            match event {
                PlaybackEvent::Started { message_id } => {
                    self.playing_message = Some(message_id);
                }
                PlaybackEvent::Finished { message_id } => {
                    if self.playing_message == Some(message_id) {
                        self.playing_message = None;
                    }
                }
                PlaybackEvent::Failed { message_id, error } => {
                    if self.playing_message == Some(message_id) {
                        self.playing_message = None;
                    }
                    self.debug_info.add_log(format!("Playback failed: {error}"));
                    self.alert = Some(Alert::new("Playback error", error));
                }
                PlaybackEvent::Shutdown => {
                    self.debug_info.add_log("Playback worker shutdown".to_string());
                }
            }
        }
    }

    fn handle_chat_event(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::SessionReady(id) => {
                self.debug_info.add_log("Session established".to_string());
                self.session = SessionState::Ready(id);
            }
            ChatEvent::SessionFailed(reason) => {
                self.debug_info.add_log(format!("Session failed: {reason}"));
                self.session = SessionState::Failed(reason);
            }
            ChatEvent::Reply { request_id, reply } => {
                let Some(pending) = &self.pending_send else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }

                self.debug_info.last_round_trip_ms = Some(reply.round_trip_ms);

                // Exactly two entries per successful exchange: user, then
                // assistant.
                let user = Message::user(reply.question);
                let assistant = Message::assistant(reply.text, reply.audio_url);

                // Auto-play fires once, at append time
                if self.auto_play {
                    if let Some(url) = assistant.audio_url.clone() {
                        self.request_playback(assistant.id, url);
                    }
                }

                self.messages.push(user);
                self.messages.push(assistant);
                self.pending_send = None;
            }
            ChatEvent::Failed { request_id, error } => {
                let Some(pending) = &self.pending_send else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }

                self.debug_info.add_log(format!("Exchange failed: {error}"));

                // A failed exchange appends exactly one assistant entry with
                // the fixed fallback text.
                self.messages
                    .push(Message::assistant(FALLBACK_ERROR_TEXT, None));
                self.pending_send = None;
            }
            ChatEvent::Shutdown => {
                self.debug_info.add_log("Chat worker shutdown".to_string());
            }
        }
    }
}
