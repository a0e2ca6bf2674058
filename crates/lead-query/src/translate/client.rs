//! Chat-completion client for SQL translation.

use std::time::Duration;

use lead_model::SchemaDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::prompt::render_system_prompt;
use super::{SqlTranslator, strip_code_fences};
use crate::error::TranslationError;

/// Default chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Default model name.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "LEAD_INSIGHT_API_KEY";

/// Settings for the remote translation service.
///
/// Every field is optional in a config file; missing fields take the
/// defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
    /// Name of the environment variable the API key is read from.
    pub api_key_env: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// [`SqlTranslator`] backed by an OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionTranslator {
    client: reqwest::blocking::Client,
    config: TranslatorConfig,
    api_key: String,
}

impl ChatCompletionTranslator {
    /// Creates a translator; the API key is sent as a bearer token.
    pub fn new(
        config: TranslatorConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, TranslationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TranslationError::Client(e.to_string()))?;
        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
        })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn transport_error(&self, err: &reqwest::Error) -> TranslationError {
        if err.is_timeout() {
            TranslationError::Timeout {
                seconds: self.config.timeout_secs,
            }
        } else {
            TranslationError::Network(err.to_string())
        }
    }
}

impl SqlTranslator for ChatCompletionTranslator {
    fn translate(
        &self,
        question: &str,
        schema: &SchemaDescriptor,
    ) -> Result<String, TranslationError> {
        let system_prompt = render_system_prompt(schema);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            prompt_len = system_prompt.len(),
            "requesting SQL translation"
        );
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(&e))?;
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|_| TranslationError::MalformedResponse {
                body: body.clone(),
            })?;
        let completion = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(TranslationError::EmptyCompletion)?;

        let sql = strip_code_fences(&completion);
        if sql.is_empty() {
            return Err(TranslationError::EmptyCompletion);
        }
        info!(sql_len = sql.len(), "translated question to SQL");
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, "deepseek-chat");
        assert!((config.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.api_key_env, "LEAD_INSIGHT_API_KEY");
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "prompt",
                },
                ChatMessage {
                    role: "user",
                    content: "question",
                },
            ],
            temperature: 0.3,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "question");
        assert_eq!(json["temperature"], 0.3);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"SELECT 1"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn test_client_creation() {
        let config = TranslatorConfig {
            model: "local-model".to_string(),
            ..TranslatorConfig::default()
        };
        let translator = ChatCompletionTranslator::new(config, "key").unwrap();
        assert_eq!(translator.config().model, "local-model");
    }
}
