use std::fmt;
use std::future::Future;
use std::time::Duration;

use gita_core::GeminiConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::GeminiError;

/// Sends a prompt to the model and returns the reply text.
///
/// Production code uses [`HttpTransport`], tests use mockall-generated mocks.
pub trait GenerateTransport: Send + Sync {
    /// Text of the first part of the first candidate.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

/// reqwest-backed transport for `models/{model}:generateContent`.
///
/// The API key travels in the `x-goog-api-key` header, never in the URL.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpTransport {
    pub fn new(config: &GeminiConfig, api_key: Option<SecretString>) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeminiError::Request { source: e })?;

        Ok(Self {
            http,
            endpoint: endpoint(config),
            api_key,
        })
    }

    /// Build a transport reading the key from `config.api_key_env`.
    ///
    /// A missing key is not an error here: the service still answers from
    /// its database, and every model call fails with
    /// [`GeminiError::MissingApiKey`].
    pub fn from_env(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let api_key = std::env::var(&config.api_key_env)
            // arch-lint: allow(no-silent-result-drop) reason="an unset key is a valid state; model calls then fail with MissingApiKey"
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);

        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "Gemini API key not set; verses missing from the database cannot be fetched",
            );
        }

        Self::new(config, api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl GenerateTransport for HttpTransport {
    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_ref().ok_or(GeminiError::MissingApiKey)?;

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GeminiError::Request { source: e })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read Gemini error body");
                    String::new()
                }
            };
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Request { source: e })?;

        reply.into_first_text().ok_or(GeminiError::EmptyResponse)
    }
}

fn endpoint(config: &GeminiConfig) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    )
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
