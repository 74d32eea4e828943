use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

/// Upstream replies carrying any of these substrings did not actually answer
/// the question. Matching is case-sensitive; the list is coupled to the
/// vendor's wording, which is why the detector below is swappable.
pub const DEGRADED_MARKERS: &[&str] = &[
    "nu este disponibil",
    "nu este configurat",
    "Quota",
    "quota",
    "Rate Limit",
    "temporar indisponibil",
];

const NO_KEY_MESSAGE: &str =
    "Serviciul AI nu este configurat. Adăugați o cheie API pentru răspunsuri generative.";
const BAD_KEY_MESSAGE: &str =
    "Cheia API nu este configurată corect sau a expirat. Verificați configurația serviciului.";
const QUOTA_MESSAGE: &str = "Quota serviciului AI a fost depășită. Se folosesc răspunsurile locale.";
const RATE_LIMIT_MESSAGE: &str =
    "Serviciul AI a atins limita de cereri (Rate Limit). Încercați din nou mai târziu.";
const UNAVAILABLE_MESSAGE: &str =
    "Serviciul AI este temporar indisponibil. Încercați din nou mai târziu.";

/// Decides whether an upstream reply is a degraded-service message rather
/// than a real answer. Kept separate from the orchestrator so the marker
/// list can change without touching the resolution chain.
#[derive(Debug, Clone)]
pub struct DegradedDetector {
    markers: Vec<String>,
}

impl DegradedDetector {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_degraded(&self, reply: &str) -> bool {
        self.markers.iter().any(|m| reply.contains(m.as_str()))
    }
}

impl Default for DegradedDetector {
    fn default() -> Self {
        Self::new(DEGRADED_MARKERS.iter().copied())
    }
}

/// The one suspending collaborator: asks an external generative service for
/// an answer given the question and a product context block.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            endpoint: "/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Chat-completions client for any OpenAI-compatible endpoint.
///
/// HTTP-level failures (bad key, quota, rate limit, 5xx) come back as
/// degraded marker messages, not errors; only transport problems (DNS,
/// connect, timeout) surface as `Err`. Both roads lead the orchestrator to
/// the local resolution chain.
pub struct OpenAiProvider {
    config: AiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("build http client")?;
        Ok(Self { config, client })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn request_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.endpoint
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl AnswerProvider for OpenAiProvider {
    async fn answer(&self, question: &str, context: &str) -> Result<String> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("no api key configured, skipping external call");
            return Ok(NO_KEY_MESSAGE.to_string());
        };

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "You are a virtual assistant for an online footwear store. Context: {context}"
                    ),
                },
                { "role": "user", "content": question },
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(self.request_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("send chat completion request")?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("external service rejected the api key");
            return Ok(BAD_KEY_MESSAGE.to_string());
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let error_body = response.text().await.unwrap_or_default();
            if error_body.contains("quota") || error_body.contains("insufficient_quota") {
                warn!("external service quota exhausted");
                return Ok(QUOTA_MESSAGE.to_string());
            }
            warn!("external service rate limited the request");
            return Ok(RATE_LIMIT_MESSAGE.to_string());
        }
        if !status.is_success() {
            warn!(status = %status, "external service returned an error status");
            return Ok(UNAVAILABLE_MESSAGE.to_string());
        }

        let payload: ChatResponse = response
            .json()
            .await
            .context("parse chat completion response")?;
        let answer = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if answer.is_empty() {
            warn!("external service returned an empty completion");
            return Ok(UNAVAILABLE_MESSAGE.to_string());
        }
        Ok(answer)
    }
}

/// Fixed-reply provider used in tests and as an offline stand-in, the same
/// role the deterministic fallback provider plays behind a real one.
#[derive(Debug, Clone)]
pub enum StaticProvider {
    Reply(String),
    Failure(String),
}

impl StaticProvider {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure(reason.into())
    }
}

#[async_trait]
impl AnswerProvider for StaticProvider {
    async fn answer(&self, _question: &str, _context: &str) -> Result<String> {
        match self {
            Self::Reply(text) => Ok(text.clone()),
            Self::Failure(reason) => anyhow::bail!("{reason}"),
        }
    }
}
