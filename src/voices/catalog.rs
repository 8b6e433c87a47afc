//! Voice catalog retrieval
//!
//! One-shot worker that fetches the provider's voice list and reports the
//! outcome over a channel. There is no caching and no refresh; a failed fetch
//! leaves the default selection in place.

use crate::config::AppConfig;
use crate::{HablaError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Deserialize;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// Descriptive labels attached to a voice by the provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceLabels {
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// One synthesis voice offered by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub labels: VoiceLabels,
}

impl Voice {
    /// "accent · gender" line for the picker, empty when unlabeled
    pub fn label_line(&self) -> String {
        let mut parts = Vec::new();
        if let Some(accent) = &self.labels.accent {
            parts.push(accent.as_str());
        }
        if let Some(gender) = &self.labels.gender {
            parts.push(gender.as_str());
        }
        parts.join(" · ")
    }
}

#[derive(Debug, Clone, Deserialize)]
struct VoicesResponse {
    voices: Vec<Voice>,
}

/// Outcome of the catalog fetch
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    Loaded(Vec<Voice>),
    Failed(String),
}

/// One-shot catalog fetcher
pub struct CatalogFetcher {
    config: AppConfig,
    event_tx: Sender<CatalogEvent>,
    event_rx: Receiver<CatalogEvent>,
}

impl CatalogFetcher {
    pub fn new(config: AppConfig) -> Self {
        let (event_tx, event_rx) = bounded(1);
        Self {
            config,
            event_tx,
            event_rx,
        }
    }

    /// Get a receiver for the fetch outcome
    pub fn event_receiver(&self) -> Receiver<CatalogEvent> {
        self.event_rx.clone()
    }

    /// Spawn the fetch on its own thread and report the outcome once.
    pub fn start(self) -> Result<()> {
        let config = self.config.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Fetching voice catalog from {}", config.voices_url);

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(CatalogEvent::Failed(format!(
                        "runtime creation failed: {e}"
                    )));
                    return;
                }
            };

            match runtime.block_on(fetch_voices(&config)) {
                Ok(voices) => {
                    info!("Voice catalog loaded: {} voices", voices.len());
                    let _ = event_tx.send(CatalogEvent::Loaded(voices));
                }
                Err(e) => {
                    error!("Voice catalog fetch failed: {}", e);
                    let _ = event_tx.send(CatalogEvent::Failed(e.user_message()));
                }
            }
        });

        Ok(())
    }
}

async fn fetch_voices(config: &AppConfig) -> Result<Vec<Voice>> {
    let url = format!("{}/v1/voices", config.voices_url.trim_end_matches('/'));
    let client = reqwest::Client::new();

    let mut request = client
        .get(&url)
        .timeout(Duration::from_secs(config.request_timeout_secs));

    if let Some(api_key) = &config.voices_api_key {
        request = request.header("xi-api-key", api_key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| HablaError::CatalogError(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HablaError::CatalogError(format!(
            "provider returned {status}"
        )));
    }

    let catalog: VoicesResponse = response
        .json()
        .await
        .map_err(|e| HablaError::CatalogError(format!("malformed response: {e}")))?;

    Ok(catalog.voices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_payload_decodes() {
        let json = r#"{
            "voices": [
                {"voice_id": "v1", "name": "Rachel", "labels": {"accent": "american", "gender": "female"}},
                {"voice_id": "v2", "name": "Mateo", "labels": {"accent": "spanish"}},
                {"voice_id": "v3", "name": "Plain"}
            ]
        }"#;

        let catalog: VoicesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.voices.len(), 3);
        assert_eq!(catalog.voices[0].label_line(), "american · female");
        assert_eq!(catalog.voices[1].label_line(), "spanish");
        assert_eq!(catalog.voices[2].label_line(), "");
    }

    #[test]
    fn test_fetcher_reports_failure() {
        let config = AppConfig::default()
            .with_voices_url("http://127.0.0.1:1")
            .with_timeout_secs(1);
        let fetcher = CatalogFetcher::new(config);
        let event_rx = fetcher.event_receiver();
        fetcher.start().unwrap();

        match event_rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            CatalogEvent::Failed(_) => {}
            CatalogEvent::Loaded(_) => panic!("nothing listens on port 1"),
        }
    }
}
