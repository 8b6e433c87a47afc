use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    User,
    Assistant,
}

/// One entry in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub origin: Origin,
    pub text: String,
    /// Remote audio resource for spoken playback, when the backend provided one
    pub audio_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            text: text.into(),
            audio_url: None,
            timestamp: Utc::now(),
        }
    }

    /// A message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    /// An assistant reply, optionally carrying an audio reference
    pub fn assistant(text: impl Into<String>, audio_url: Option<String>) -> Self {
        let mut message = Self::new(Origin::Assistant, text);
        message.audio_url = audio_url;
        message
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_has_no_audio() {
        let msg = Message::user("Hola");
        assert!(msg.is_user());
        assert!(!msg.has_audio());
        assert_eq!(msg.text, "Hola");
    }

    #[test]
    fn test_assistant_message_carries_audio_url() {
        let msg = Message::assistant("Hi there", Some("https://cdn.example/a.mp3".into()));
        assert!(!msg.is_user());
        assert_eq!(msg.audio_url.as_deref(), Some("https://cdn.example/a.mp3"));
    }
}
