use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{ChatClient, ChatMessage};
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI chat completions API (and compatible endpoints
/// such as a local LM Studio or Ollama server).
///
/// Sends the whole history as `messages` and returns the content of the first
/// choice. An empty API key sends no `Authorization` header.
///
/// Requests are bounded by a timeout; expiry is reported like any other
/// upstream failure.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{COMPLETIONS_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable              | Default                     | Purpose                    |
    /// |-----------------------|-----------------------------|----------------------------|
    /// | `OPENAI_BASE_URL`     | `https://api.openai.com/v1` | Any compatible server      |
    /// | `OPENAI_MODEL`        | `gpt-4o-mini`               | Model sent with each call  |
    /// | `OPENAI_API_KEY`      | `""` (empty)                | Bearer token               |
    /// | `OPENAI_TIMEOUT_SECS` | `60`                        | Per-request deadline       |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let key = lookup("OPENAI_API_KEY").unwrap_or_default();
        let timeout_secs = lookup("OPENAI_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(key, model, base, Duration::from_secs(timeout_secs))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn extract_reply(response: ApiResponse) -> Result<String, DomainError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::upstream("OpenAiClient: response contained no reply"))
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages,
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::upstream(format!("OpenAiClient: request timed out: {e}"))
            } else {
                DomainError::upstream(format!("OpenAiClient: request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiClient: failed to parse response: {e}"))
        })?;
        debug!("OpenAiClient: received {} choices", api_response.choices.len());

        Self::extract_reply(api_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_without_double_slash() {
        let client =
            OpenAiClient::new("k", "m", "http://localhost:1234/v1/", Duration::from_secs(1));
        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn from_lookup_uses_defaults_when_unset() {
        let client = OpenAiClient::from_lookup(|_| None);
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
        assert!(client.api_key.is_empty());
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let vars: std::collections::HashMap<&str, &str> = [
            ("OPENAI_BASE_URL", "http://localhost:11434/v1"),
            ("OPENAI_MODEL", "llama3"),
            ("OPENAI_API_KEY", "sk-local"),
            ("OPENAI_TIMEOUT_SECS", "not a number"),
        ]
        .into_iter()
        .collect();

        let client = OpenAiClient::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(client.model(), "llama3");
        assert_eq!(client.url(), "http://localhost:11434/v1/chat/completions");
        assert_eq!(client.api_key, "sk-local");
    }

    #[test]
    fn extract_reply_takes_first_choice() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},
                           {"message":{"role":"assistant","content":"second"}}]}"#,
        )
        .unwrap();
        assert_eq!(OpenAiClient::extract_reply(response).unwrap(), "first");
    }

    #[test]
    fn extract_reply_fails_without_choices() {
        let response: ApiResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = OpenAiClient::extract_reply(response).unwrap_err();
        assert!(err.is_upstream_error());
    }

    #[test]
    fn extract_reply_fails_on_null_content() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(OpenAiClient::extract_reply(response).is_err());
    }
}
