//! Application configuration
//!
//! Centralized configuration for the backend, voice catalog, and playback
//! behavior. Values come from defaults, builder methods, or `HABLA_*`
//! environment variables.

use std::env;

/// Default chat/session backend.
pub const DEFAULT_BACKEND_URL: &str = "https://chatbot-voz-production.up.railway.app";

/// Default voice catalog provider.
pub const DEFAULT_VOICES_URL: &str = "https://api.elevenlabs.io";

/// Configuration for the complete application
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the chat/session backend
    pub backend_url: String,

    /// Base URL of the voice catalog provider
    pub voices_url: String,

    /// Optional API key sent to the voice catalog provider
    pub voices_api_key: Option<String>,

    /// Voice used until the user picks another one
    pub default_voice_id: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Whether received audio plays without explicit request
    pub auto_play: bool,

    /// Capacity of the command/event channels
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            voices_url: DEFAULT_VOICES_URL.to_string(),
            voices_api_key: None,
            default_voice_id: crate::voices::DEFAULT_VOICE_ID.to_string(),
            request_timeout_secs: 30,
            auto_play: true,
            channel_capacity: 32,
        }
    }
}

impl AppConfig {
    /// Load configuration from `HABLA_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("HABLA_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Ok(url) = env::var("HABLA_VOICES_URL") {
            config.voices_url = url;
        }
        config.voices_api_key = env::var("HABLA_VOICES_API_KEY").ok();
        if let Ok(voice_id) = env::var("HABLA_VOICE_ID") {
            config.default_voice_id = voice_id;
        }
        if let Ok(secs) = env::var("HABLA_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout_secs = secs;
            }
        }
        if let Ok(auto) = env::var("HABLA_AUTO_PLAY") {
            config.auto_play = auto != "0" && !auto.eq_ignore_ascii_case("false");
        }

        config
    }

    /// Set the backend base URL
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Set the voice catalog base URL
    pub fn with_voices_url(mut self, url: impl Into<String>) -> Self {
        self.voices_url = url.into();
        self
    }

    /// Set the voice catalog API key
    pub fn with_voices_api_key(mut self, key: impl Into<String>) -> Self {
        self.voices_api_key = Some(key.into());
        self
    }

    /// Set the default voice
    pub fn with_default_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.default_voice_id = voice_id.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Disable automatic playback of received audio
    pub fn without_auto_play(mut self) -> Self {
        self.auto_play = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend_url.is_empty() {
            return Err("Backend URL is required".to_string());
        }
        if !self.backend_url.starts_with("http") {
            return Err(format!("Backend URL is not an HTTP URL: {}", self.backend_url));
        }
        if self.voices_url.is_empty() {
            return Err("Voice catalog URL is required".to_string());
        }
        if self.default_voice_id.is_empty() {
            return Err("A default voice id is required".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be at least one second".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.auto_play);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .with_backend_url("http://localhost:8000")
            .with_default_voice("test-voice")
            .without_auto_play();

        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.default_voice_id, "test-voice");
        assert!(!config.auto_play);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = AppConfig::default().with_backend_url("railway.app");
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_backend_url("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = AppConfig::default().with_timeout_secs(0);
        assert!(config.validate().is_err());
    }
}
