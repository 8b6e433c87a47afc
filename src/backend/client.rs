//! REST client for the chat/session backend

use crate::backend::types::{ChatRequest, ChatResponse, NewSessionResponse};
use crate::{HablaError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for the conversational backend.
///
/// Holds a connection-pooling `reqwest::Client`; cloning is cheap.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            timeout,
        }
    }

    /// Request a fresh session identifier.
    pub async fn new_session(&self) -> Result<String> {
        let url = format!("{}/new_session", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HablaError::SessionError(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(HablaError::SessionError(format!(
                "backend returned {status}: {body}"
            )));
        }

        let session: NewSessionResponse = response
            .json()
            .await
            .map_err(|e| HablaError::SessionError(format!("malformed response: {e}")))?;

        debug!("Obtained session {}", session.session_id);
        Ok(session.session_id)
    }

    /// Exchange one question for one answer within the given session.
    pub async fn chat(
        &self,
        session_id: &str,
        question: &str,
        voice_id: Option<&str>,
    ) -> Result<ChatResponse> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            session_id: session_id.to_string(),
            question: question.to_string(),
            voice_id: voice_id.map(str::to_string),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HablaError::ChatError(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(HablaError::ChatError(format!(
                "backend returned {status}: {body}"
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| HablaError::ChatError(format!("malformed response: {e}")))
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = BackendClient::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:8000");

        let client = BackendClient::new("http://localhost:8000", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
