//! HTTP client for OpenAI-compatible chat completion endpoints.
//!
//! # Wire contract
//!
//! Every sub-agent call is a single `POST {base_url}/chat/completions` with
//! a JSON body of the form:
//!
//! ```text
//! { "model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}],
//!   "temperature": 0.3, "max_tokens": 2000 }
//! ```
//!
//! The response we depend on is `choices[0].message.content`. Anything else
//! in the body (usage, ids, provider metadata) is ignored.
//!
//! ## Outcomes
//!
//! - Non-2xx status → [`CompletionError::Upstream`] carrying the status code
//!   and its reason phrase.
//! - Body that is not JSON, or JSON without a `choices` array →
//!   [`CompletionError::MalformedResponse`].
//! - Empty `choices`, missing `message`, or `content: null` → a
//!   [`CompletionResult`] with `text: None`. Deciding whether that is fatal
//!   belongs to the caller.
//!
//! ## Timeouts
//!
//! The underlying `reqwest::Client` is built with an overall per-request
//! timeout. A slow upstream surfaces as [`CompletionError::Timeout`] instead
//! of holding the serving task forever. There is no retry here; wrap the
//! client in [`crate::retry::Retrying`] for that.
//!
//! OpenRouter additionally reads the `HTTP-Referer` and `X-Title` headers
//! for attribution; both come from [`ClientConfig`].

use std::time::Duration;

use async_trait::async_trait;
use laudos_core::models::completion::{CompletionRequest, CompletionResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::CompletionError;
use crate::service::CompletionService;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Connection settings for [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub api_key: String,
    /// Sent as `HTTP-Referer`.
    pub site_url: String,
    /// Sent as `X-Title`.
    pub site_name: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            site_url: "http://localhost:3000".to_string(),
            site_name: "Laudos.AI".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Completion client bound to one endpoint and credential.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    config: ClientConfig,
}

impl CompletionClient {
    pub fn new(config: ClientConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::Config("api key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Config(e.to_string()))?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        let mut messages = Vec::with_capacity(2);
        if !request.system_prompt.is_empty() {
            messages.push(WireMessage {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &request.user_prompt,
        });

        let body = ChatRequestBody {
            model: &request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        info!(model = %request.model, max_tokens = request.max_tokens, "sending completion request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.site_name)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or("").to_string();
            let detail = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = %truncate(&detail, 500),
                "completion service returned an error status"
            );
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                status_text,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponseBody = serde_json::from_str(&raw)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        info!(
            model = %request.model,
            text_len = text.as_ref().map(String::len),
            "completion received"
        );

        Ok(CompletionResult { text })
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
