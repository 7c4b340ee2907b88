//! OpenAI-compatible chat completions client.
//!
//! All supported providers (Gemini's OpenAI-compat endpoint, DeepSeek,
//! OpenAI itself) speak this wire dialect, so one client covers the whole
//! provider table.

use std::time::Duration;

use async_trait::async_trait;
use lifeline_common::{LifelineError, Result};
use serde::{Deserialize, Serialize};

use crate::client::{ChatClient, ChatRequest, ChatResponse, Role};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    model: String,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

pub struct OpenAiCompatClient {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl OpenAiCompatClient {
    pub fn new(
        base_url: Option<String>,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
            timeout,
            http_client: reqwest::Client::new(),
        }
    }

    fn role_to_string(role: &Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn build_messages(request: &ChatRequest) -> Vec<WireMessage> {
        let mut messages = Vec::new();
        if let Some(ref system) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        for msg in &request.messages {
            messages.push(WireMessage {
                role: Self::role_to_string(&msg.role).to_string(),
                content: msg.content.clone(),
            });
        }
        messages
    }

    #[cfg(test)]
    fn build_request_body(&self, request: &ChatRequest) -> WireRequest {
        WireRequest {
            model: self.model.clone(),
            messages: Self::build_messages(request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = WireRequest {
            model: self.model.clone(),
            messages: Self::build_messages(&request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| LifelineError::Provider(format!("Chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(LifelineError::Provider(format!(
                "Provider API error {status}: {body_text}"
            )));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LifelineError::Provider(format!("Failed to parse provider response: {e}")))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LifelineError::Provider("No choices in provider response".to_string()))?;

        Ok(ChatResponse {
            content: choice.message.content,
            model: wire.model,
            finish_reason: choice.finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatMessage;

    fn test_client(base_url: Option<&str>) -> OpenAiCompatClient {
        OpenAiCompatClient::new(
            base_url.map(String::from),
            "gpt-4o".to_string(),
            "sk-test".to_string(),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn request_body_matches_wire_format() {
        let client = test_client(None);
        let request = ChatRequest {
            system_prompt: Some("Be supportive.".to_string()),
            messages: vec![ChatMessage::user("Hello")],
            temperature: Some(0.7),
            max_tokens: Some(1000),
        };

        let body = client.build_request_body(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 1000);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Be supportive.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Hello");
    }

    #[test]
    fn request_body_omits_unset_fields() {
        let client = test_client(None);
        let request = ChatRequest {
            system_prompt: None,
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: None,
        };

        let body = client.build_request_body(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn default_base_url_is_openai() {
        let client = test_client(None);
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = test_client(Some("https://api.deepseek.com/v1/"));
        assert_eq!(
            format!("{}/chat/completions", client.base_url.trim_end_matches('/')),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }
}
