//! Integration tests for the message/session exchange flow
//!
//! These tests drive the central application state through hand-wired
//! channels, standing in for the worker threads. No network or audio device
//! is needed.

use crossbeam_channel::{bounded, Receiver, Sender};
use habla::audio::{PlaybackCommand, PlaybackEvent};
use habla::backend::{ChatCommand, ChatEvent, ChatReply, SessionState};
use habla::config::AppConfig;
use habla::messages::{Origin, FALLBACK_ERROR_TEXT};
use habla::ui::{AppState, EMPTY_INPUT_NOTICE};
use uuid::Uuid;

/// App state with both worker ends held by the test
struct Harness {
    state: AppState,
    chat_commands: Receiver<ChatCommand>,
    chat_events: Sender<ChatEvent>,
    playback_commands: Receiver<PlaybackCommand>,
    playback_events: Sender<PlaybackEvent>,
}

impl Harness {
    fn new() -> Self {
        let mut state = AppState::new(&AppConfig::default());

        let (chat_command_tx, chat_commands) = bounded(8);
        let (chat_events, chat_event_rx) = bounded(8);
        let (playback_command_tx, playback_commands) = bounded(8);
        let (playback_events, playback_event_rx) = bounded(8);

        state.chat_command_tx = Some(chat_command_tx);
        state.chat_event_rx = Some(chat_event_rx);
        state.playback_command_tx = Some(playback_command_tx);
        state.playback_event_rx = Some(playback_event_rx);

        Self {
            state,
            chat_commands,
            chat_events,
            playback_commands,
            playback_events,
        }
    }

    fn with_session(mut self) -> Self {
        self.state.session = SessionState::Ready("session-1".to_string());
        self
    }

    /// Submit `text` and return the request id the state attached to it
    fn submit(&mut self, text: &str) -> Uuid {
        self.state.input_text = text.to_string();
        self.state.submit();
        match self.chat_commands.try_recv().expect("expected a Send command") {
            ChatCommand::Send { request_id, .. } => request_id,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn deliver_reply(&mut self, request_id: Uuid, text: &str, audio_url: Option<&str>) {
        self.chat_events
            .send(ChatEvent::Reply {
                request_id,
                reply: ChatReply {
                    question: "Hola".to_string(),
                    text: text.to_string(),
                    audio_url: audio_url.map(str::to_string),
                    round_trip_ms: 42,
                },
            })
            .unwrap();
        self.state.poll_events();
    }
}

#[test]
fn empty_input_is_rejected_without_network_call() {
    let mut harness = Harness::new().with_session();

    for input in ["", "   ", "\t\n"] {
        harness.state.input_text = input.to_string();
        harness.state.submit();

        assert_eq!(
            harness.state.alert.as_ref().map(|a| a.body.as_str()),
            Some(EMPTY_INPUT_NOTICE),
            "whitespace input must surface the validation alert"
        );
        assert!(
            harness.chat_commands.try_recv().is_err(),
            "no network command may be issued for {input:?}"
        );
        harness.state.alert = None;
    }

    assert!(harness.state.messages.is_empty());
}

#[test]
fn successful_exchange_appends_user_then_assistant() {
    let mut harness = Harness::new().with_session();

    let request_id = harness.submit("Hola");
    assert!(harness.state.input_text.is_empty(), "input clears on submit");

    harness.deliver_reply(request_id, "¡Buenos días!", Some("https://cdn.example/reply.mp3"));

    let messages = harness.state.messages.snapshot();
    assert_eq!(messages.len(), 2, "exactly two entries per successful exchange");
    assert_eq!(messages[0].origin, Origin::User);
    assert_eq!(messages[0].text, "Hola");
    assert_eq!(messages[1].origin, Origin::Assistant);
    assert_eq!(messages[1].text, "¡Buenos días!");
    assert_eq!(
        messages[1].audio_url.as_deref(),
        Some("https://cdn.example/reply.mp3")
    );
    assert!(harness.state.pending_send.is_none());
}

#[test]
fn failed_exchange_appends_single_fallback_entry() {
    let mut harness = Harness::new().with_session();

    let request_id = harness.submit("Hola");
    harness
        .chat_events
        .send(ChatEvent::Failed {
            request_id,
            error: "backend returned 500".to_string(),
        })
        .unwrap();
    harness.state.poll_events();

    let messages = harness.state.messages.snapshot();
    assert_eq!(messages.len(), 1, "exactly one entry per failed exchange");
    assert_eq!(messages[0].origin, Origin::Assistant);
    assert_eq!(messages[0].text, FALLBACK_ERROR_TEXT);
    assert!(messages[0].audio_url.is_none());
    assert!(harness.state.pending_send.is_none());
}

#[test]
fn auto_play_triggers_exactly_once_per_entry() {
    let mut harness = Harness::new().with_session();
    harness.state.auto_play = true;

    let request_id = harness.submit("Hola");
    harness.deliver_reply(request_id, "Hi", Some("https://cdn.example/a.mp3"));

    let assistant_id = harness.state.messages.last().unwrap().id;
    match harness.playback_commands.try_recv().unwrap() {
        PlaybackCommand::Play { url, message_id } => {
            assert_eq!(url, "https://cdn.example/a.mp3");
            assert_eq!(message_id, assistant_id);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    // Further polling must not replay the same entry
    harness.state.poll_events();
    harness.state.poll_events();
    assert!(harness.playback_commands.try_recv().is_err());
}

#[test]
fn auto_play_disabled_means_no_playback_request() {
    let mut harness = Harness::new().with_session();
    harness.state.auto_play = false;

    let request_id = harness.submit("Hola");
    harness.deliver_reply(request_id, "Hi", Some("https://cdn.example/a.mp3"));

    assert!(harness.playback_commands.try_recv().is_err());

    // Explicit user action still plays the historical message
    let assistant = harness.state.messages.last().unwrap();
    harness.state.play_message(&assistant);
    assert!(matches!(
        harness.playback_commands.try_recv(),
        Ok(PlaybackCommand::Play { .. })
    ));
}

#[test]
fn text_only_reply_never_requests_playback() {
    let mut harness = Harness::new().with_session();
    harness.state.auto_play = true;

    let request_id = harness.submit("Hola");
    harness.deliver_reply(request_id, "Hi", None);

    assert_eq!(harness.state.messages.len(), 2);
    assert!(harness.playback_commands.try_recv().is_err());
}

#[test]
fn voice_selection_is_local_and_closes_dialog() {
    let mut harness = Harness::new().with_session();
    harness.state.show_voice_picker = true;

    harness.state.select_voice("voice-2");

    assert_eq!(harness.state.selected_voice_id, "voice-2");
    assert!(!harness.state.show_voice_picker);
    assert!(
        harness.chat_commands.try_recv().is_err(),
        "selection must not trigger a network call"
    );

    // The selection rides along on the next exchange
    harness.state.input_text = "Hola".to_string();
    harness.state.submit();
    match harness.chat_commands.try_recv().unwrap() {
        ChatCommand::Send { voice_id, .. } => {
            assert_eq!(voice_id.as_deref(), Some("voice-2"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn one_send_in_flight_at_a_time() {
    let mut harness = Harness::new().with_session();

    let _request_id = harness.submit("first");
    assert!(harness.state.pending_send.is_some());

    harness.state.input_text = "second".to_string();
    harness.state.submit();

    assert!(
        harness.chat_commands.try_recv().is_err(),
        "a second send must not be issued while one is pending"
    );
    assert_eq!(harness.state.input_text, "second", "rejected input is kept");
}

#[test]
fn submits_are_blocked_until_session_exists() {
    let mut harness = Harness::new();
    assert_eq!(harness.state.session, SessionState::Pending);

    harness.state.input_text = "Hola".to_string();
    harness.state.submit();

    assert!(harness.chat_commands.try_recv().is_err());
    assert!(harness.state.messages.is_empty());
    assert!(!harness.state.can_submit());
}

#[test]
fn session_failure_surfaces_and_retry_reissues_fetch() {
    let mut harness = Harness::new();

    harness
        .chat_events
        .send(ChatEvent::SessionFailed("connection refused".to_string()))
        .unwrap();
    harness.state.poll_events();
    assert!(harness.state.session.is_failed());

    harness.state.retry_session();
    assert_eq!(harness.state.session, SessionState::Pending);
    assert!(matches!(
        harness.chat_commands.try_recv(),
        Ok(ChatCommand::FetchSession)
    ));

    harness
        .chat_events
        .send(ChatEvent::SessionReady("session-9".to_string()))
        .unwrap();
    harness.state.poll_events();
    assert_eq!(harness.state.session.id(), Some("session-9"));
}

#[test]
fn playback_failure_raises_modal_alert_only() {
    let mut harness = Harness::new().with_session();

    let request_id = harness.submit("Hola");
    harness.deliver_reply(request_id, "Hi", Some("https://cdn.example/a.mp3"));
    let assistant_id = harness.state.messages.last().unwrap().id;

    harness
        .playback_events
        .send(PlaybackEvent::Failed {
            message_id: assistant_id,
            error: "Could not play the audio response.".to_string(),
        })
        .unwrap();
    harness.state.poll_events();

    assert!(harness.state.alert.is_some(), "playback failure must alert");
    assert_eq!(
        harness.state.messages.len(),
        2,
        "playback failure must not touch the conversation"
    );
}

#[test]
fn reply_with_unknown_request_id_is_ignored() {
    let mut harness = Harness::new().with_session();

    let _request_id = harness.submit("Hola");

    // A reply correlated to some other request must not complete this one
    harness.deliver_reply(Uuid::new_v4(), "stray", None);
    assert!(harness.state.pending_send.is_some());
    assert!(harness.state.messages.is_empty());
}
