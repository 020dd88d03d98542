use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use troupe_core::config::ModelConfig;
use troupe_core::error::{Result, TroupeError};
use troupe_core::traits::LlmClient;
use troupe_core::types::{ChatMessage, ToolDefinition};

use crate::presets::{api_key_env_var, get_preset};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-compatible client. Works with OpenAI, Groq, Ollama, OpenRouter, etc.
pub struct OpenAiClient {
    http: Client,
}

impl OpenAiClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

// Request types
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<OaiMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OaiTool>,
}

#[derive(Serialize)]
struct OaiMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OaiTool {
    r#type: String,
    function: OaiToolDef,
}

#[derive(Serialize)]
struct OaiToolDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

// Response types
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn resolve_url(config: &ModelConfig) -> String {
    if let Some(url) = &config.base_url {
        return url.clone();
    }
    get_preset(&config.provider)
        .map(|p| p.default_base_url.to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn resolve_api_key(config: &ModelConfig) -> Option<String> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(api_key_env_var(&config.provider)).ok())
}

impl LlmClient for OpenAiClient {
    fn complete(
        &self,
        config: &ModelConfig,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
    ) -> BoxFuture<'_, Result<String>> {
        let url = resolve_url(config);
        let api_key = resolve_api_key(config);

        let request = ChatRequest {
            model: config.model_id.clone(),
            messages: messages
                .into_iter()
                .map(|m| OaiMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content,
                })
                .collect(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            tools: tools
                .iter()
                .map(|t| OaiTool {
                    r#type: "function".to_string(),
                    function: OaiToolDef {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: t.input_schema.clone(),
                    },
                })
                .collect(),
        };
        let model_id = config.model_id.clone();

        Box::pin(async move {
            debug!(model = %model_id, url = %url, "requesting completion");

            let mut req = self.http.post(&url).json(&request);
            if let Some(key) = api_key {
                req = req.header("Authorization", format!("Bearer {}", key));
            }

            let resp = req
                .send()
                .await
                .map_err(|e| TroupeError::LlmRequest(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(TroupeError::LlmRequest(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }

            let body: ChatResponse = resp
                .json()
                .await
                .map_err(|e| TroupeError::LlmParse(e.to_string()))?;

            body.choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or_else(|| TroupeError::LlmParse("response has no text choice".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> ModelConfig {
        ModelConfig {
            provider: provider.into(),
            model_id: "m".into(),
            api_key: None,
            base_url: None,
            max_tokens: 128,
            temperature: None,
        }
    }

    #[test]
    fn test_resolve_url_prefers_override() {
        let mut cfg = config("groq");
        cfg.base_url = Some("http://localhost:9/v1".into());
        assert_eq!(resolve_url(&cfg), "http://localhost:9/v1");
    }

    #[test]
    fn test_resolve_url_from_preset() {
        assert!(resolve_url(&config("groq")).contains("api.groq.com"));
        // Unknown providers fall through to the OpenAI endpoint.
        assert_eq!(resolve_url(&config("mystery")), DEFAULT_API_URL);
    }

    #[test]
    fn test_request_serialization_skips_empty_tools() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![OaiMessage {
                role: "user".into(),
                content: "hi".into(),
            }],
            max_tokens: 16,
            temperature: None,
            tools: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("tools"));
        assert!(!json.contains("temperature"));
    }
}
