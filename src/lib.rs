pub mod audio;
pub mod backend;
pub mod config;
pub mod messages;
pub mod ui;
pub mod voices;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HablaError {
    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Chat request error: {0}")]
    ChatError(String),

    #[error("Voice catalog error: {0}")]
    CatalogError(String),

    #[error("Audio playback error: {0}")]
    PlaybackError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl HablaError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A session can be re-requested on user action
            HablaError::SessionError(_) => true,
            // A failed exchange only loses that one message
            HablaError::ChatError(_) => true,
            // The default voice remains usable without a catalog
            HablaError::CatalogError(_) => true,
            // Playback failure leaves the text response intact
            HablaError::PlaybackError(_) => true,
            HablaError::HttpError(_) => true,
            HablaError::ConfigError(_) => false,
            HablaError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            HablaError::SessionError(_) => {
                "Could not reach the chat service. Check your connection and retry.".to_string()
            }
            HablaError::ChatError(_) => {
                "Sending the message failed. Please try again.".to_string()
            }
            HablaError::CatalogError(_) => {
                "Voice list unavailable. The default voice will be used.".to_string()
            }
            HablaError::PlaybackError(_) => {
                "Could not play the audio response.".to_string()
            }
            HablaError::HttpError(_) => {
                "Network error occurred. Please try again.".to_string()
            }
            HablaError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            HablaError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HablaError>;
