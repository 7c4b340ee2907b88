//! The brain itself: provider query with fallback degradation.

use std::sync::Arc;

use lifeline_common::{LifelineError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{ChatClient, ChatMessage, ChatRequest};
use crate::config::{build_chat_client, select_provider, BrainConfig};
use crate::fallback;

/// System directive sent with every provider call.
const SYSTEM_PROMPT: &str = "You are the Lifeline Brain - a calm, supportive AI assistant \
for a community support coordination system. Your role is to help coordinate support \
services, provide guidance to dispatchers and responders, and offer compassionate \
assistance to citizens seeking help.\n\n\
Key principles:\n\
- Use calming, supportive language\n\
- Never escalate anxiety - always de-escalate\n\
- Provide clear, actionable guidance\n\
- Remind users this is a support system, not emergency services (911)\n\
- Focus on coordination, resources, and next steps\n\n\
For emergencies requiring immediate police, fire, or medical response, always direct \
users to call 911.\n\n\
Keep responses brief unless asked for detailed information.";

const EMPTY_RESPONSE_APOLOGY: &str = "I apologize, I could not process that request.";

const NO_PROVIDER_MESSAGE: &str =
    "AI service is not configured. Please add an API key for Google, DeepSeek, or OpenAI.";

/// Where an answer came from. The only caller-visible signal of degraded
/// quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOrigin {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub origin: AnswerOrigin,
}

/// Answers free-text questions, degrading to the fallback table when the
/// provider misbehaves. Holds no dispatch state; safe to call concurrently.
pub struct Brain {
    client: Option<Arc<dyn ChatClient>>,
    max_history_turns: usize,
    temperature: f32,
    max_tokens: u32,
}

impl Brain {
    /// Resolve the provider table once and build the brain. With no
    /// configured credential the brain is providerless: every `ask` fails
    /// fast with `ProviderUnavailable`, and no network call is ever made.
    pub fn from_config(config: &BrainConfig) -> Self {
        let client = match select_provider(&config.providers) {
            Some(provider) => Some(build_chat_client(&provider, config.timeout_ms)),
            None => {
                warn!("No AI provider credential configured; brain will refuse questions");
                None
            }
        };
        Self {
            client,
            max_history_turns: config.max_history_turns,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Build with an explicit client (tests, custom wiring).
    pub fn with_client(client: Arc<dyn ChatClient>, config: &BrainConfig) -> Self {
        Self {
            client: Some(client),
            max_history_turns: config.max_history_turns,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.client.is_some()
    }

    /// Answer a question given prior conversation turns.
    ///
    /// Only `InvalidInput` (empty question) and `ProviderUnavailable` (no
    /// provider configured at all) surface as errors. A failing provider is
    /// recovered into a fallback answer — someone asking for help must
    /// always get a response.
    pub async fn ask(&self, question: &str, history: &[ChatMessage]) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(LifelineError::InvalidInput("Question is required".into()));
        }

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| LifelineError::ProviderUnavailable(NO_PROVIDER_MESSAGE.into()))?;

        let request = self.build_request(question, history);

        match client.complete(request).await {
            Ok(response) => {
                let text = if response.content.trim().is_empty() {
                    EMPTY_RESPONSE_APOLOGY.to_string()
                } else {
                    response.content
                };
                Ok(Answer {
                    text,
                    origin: AnswerOrigin::Ai,
                })
            }
            Err(e) => {
                warn!(error = %e, "Provider call failed, answering from fallback table");
                Ok(Answer {
                    text: fallback::answer(question).to_string(),
                    origin: AnswerOrigin::Fallback,
                })
            }
        }
    }

    /// Bounded message context: system directive + most recent history
    /// turns + the new question.
    fn build_request(&self, question: &str, history: &[ChatMessage]) -> ChatRequest {
        let skip = history.len().saturating_sub(self.max_history_turns);
        if skip > 0 {
            debug!(dropped = skip, "Truncating conversation history");
        }
        let mut messages: Vec<ChatMessage> = history[skip..].to_vec();
        messages.push(ChatMessage::user(question));

        ChatRequest {
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            messages,
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}
