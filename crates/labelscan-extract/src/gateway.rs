//! HTTP client for the hosted chat-completion model.
//!
//! Wraps `reqwest` against an OpenAI-style `/chat/completions` route with
//! credential management and status-code error classification. Failures are
//! classified from the HTTP status, never by string-matching response
//! bodies. No retries happen here; retry policy belongs to callers.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

use crate::error::ExtractError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Low, bounded randomness so extraction stays deterministic-ish.
const TEMPERATURE: f64 = 0.3;

/// Output cap for image calls, which are billed per token on top of the
/// image payload.
const IMAGE_MAX_TOKENS: u32 = 1024;

/// The one suspension point of the pipeline: a single completion call per
/// scan, in text or image mode.
pub trait CompletionGateway {
    /// Sends a text-only extraction instruction and returns the raw
    /// response content.
    fn complete_text(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ExtractError>> + Send;

    /// Sends an instruction plus an inline image payload and returns the
    /// raw response content.
    fn complete_image(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> impl std::future::Future<Output = Result<String, ExtractError>> + Send;
}

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Use [`ModelClient::new`] for production or [`ModelClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ModelClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ModelClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Configuration`] if `api_key` is empty — checked
    ///   here so no scan ever attempts network I/O without a credential.
    /// - [`ExtractError::Http`] if the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ExtractError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`ModelClient::new`].
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
        if api_key.trim().is_empty() {
            return Err(ExtractError::Configuration);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("labelscan/0.1 (label-extraction)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Posts one chat request and extracts the message content.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Authentication`] — HTTP 401/403.
    /// - [`ExtractError::QuotaExceeded`] — HTTP 429.
    /// - [`ExtractError::ServiceUnavailable`] — HTTP 404 (unknown model/route).
    /// - [`ExtractError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ExtractError::EmptyResponse`] — 2xx with no content in the first
    ///   choice.
    /// - [`ExtractError::MalformedJson`] — 2xx body that is not the expected
    ///   envelope.
    /// - [`ExtractError::Http`] — network or TLS failure.
    async fn chat(&self, body: serde_json::Value) -> Result<String, ExtractError> {
        let url = self.completions_url();
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ExtractError::Authentication {
                status: status.as_u16(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ExtractError::QuotaExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ExtractError::ServiceUnavailable { url });
        }
        if !status.is_success() {
            return Err(ExtractError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ExtractError::MalformedJson {
                detail: e.to_string(),
            })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty());

        content.ok_or(ExtractError::EmptyResponse)
    }
}

impl CompletionGateway for ModelClient {
    async fn complete_text(&self, prompt: &str) -> Result<String, ExtractError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });
        self.chat(body).await
    }

    async fn complete_image(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, ExtractError> {
        let b64 = BASE64.encode(image_bytes);
        let body = serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
            "max_tokens": IMAGE_MAX_TOKENS,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:{mime_type};base64,{b64}") } }
                ]
            }]
        });
        self.chat(body).await
    }
}
