//! Wire types for the chat backend REST API

use serde::{Deserialize, Serialize};

/// Response of `GET /new_session`
#[derive(Debug, Clone, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

/// Response of `POST /chat`
///
/// `audio_url` is nominally always present, but the client tolerates its
/// absence and falls back to a text-only reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// A completed exchange as handed to the UI
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// The user text the reply answers
    pub question: String,
    pub text: String,
    pub audio_url: Option<String>,
    /// Wall-clock duration of the exchange in milliseconds
    pub round_trip_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_omits_empty_voice() {
        let request = ChatRequest {
            session_id: "s1".into(),
            question: "Hola".into(),
            voice_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("voice_id"));

        let request = ChatRequest {
            voice_id: Some("v1".into()),
            ..request
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"voice_id\":\"v1\""));
    }

    #[test]
    fn test_chat_response_tolerates_missing_audio() {
        let response: ChatResponse = serde_json::from_str(r#"{"response":"Hi"}"#).unwrap();
        assert_eq!(response.response, "Hi");
        assert!(response.audio_url.is_none());

        let response: ChatResponse =
            serde_json::from_str(r#"{"response":"Hi","audio_url":"https://x/a.mp3"}"#).unwrap();
        assert_eq!(response.audio_url.as_deref(), Some("https://x/a.mp3"));
    }

    #[test]
    fn test_new_session_response_decodes() {
        let response: NewSessionResponse =
            serde_json::from_str(r#"{"session_id":"abc-123"}"#).unwrap();
        assert_eq!(response.session_id, "abc-123");
    }
}
