//! Provider configuration and selection.
//!
//! Providers are an ordered table; the first entry with a resolvable
//! credential wins. Selection happens once at startup — the resulting
//! [`ActiveProvider`] descriptor is what gets injected into the brain,
//! never re-read per request.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::ChatClient;
use crate::openai::OpenAiCompatClient;

/// One entry in the ordered provider table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name, e.g. "google", "deepseek", "openai".
    pub name: String,

    pub model: String,

    /// OpenAI-compatible base URL. Defaults to api.openai.com when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Explicit credential. Prefer `api_key_env` so keys stay out of files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable to read the credential from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    /// Resolve the credential: explicit config value first, then the
    /// configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        self.api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.is_empty())
    }
}

/// Brain configuration: the provider table plus sampling and context limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainConfig {
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// How many prior conversation turns are forwarded to the provider.
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout on the provider call.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_history_turns() -> usize {
    10
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// The original service's provider order: Google's OpenAI-compat Gemini
/// endpoint, then DeepSeek, then OpenAI proper.
fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "google".into(),
            model: "gemini-2.5-flash-lite-preview-06-17".into(),
            api_url: Some("https://generativelanguage.googleapis.com/v1beta/openai".into()),
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY_GOOGLE".into()),
        },
        ProviderConfig {
            name: "deepseek".into(),
            model: "deepseek-chat".into(),
            api_url: Some("https://api.deepseek.com/v1".into()),
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY_DEEPSEEK".into()),
        },
        ProviderConfig {
            name: "openai".into(),
            model: "gpt-4o".into(),
            api_url: None,
            api_key: None,
            api_key_env: Some("OPENAI_API_KEY".into()),
        },
    ]
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            max_history_turns: default_max_history_turns(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// A provider entry resolved to a usable credential.
#[derive(Debug, Clone)]
pub struct ActiveProvider {
    pub name: String,
    pub model: String,
    pub api_url: Option<String>,
    pub api_key: String,
}

/// Walk the provider table in order and pick the first configured entry.
pub fn select_provider(providers: &[ProviderConfig]) -> Option<ActiveProvider> {
    for provider in providers {
        if let Some(api_key) = provider.resolve_api_key() {
            info!(provider = %provider.name, model = %provider.model, "Selected AI provider");
            return Some(ActiveProvider {
                name: provider.name.clone(),
                model: provider.model.clone(),
                api_url: provider.api_url.clone(),
                api_key,
            });
        }
    }
    None
}

/// Build the chat client for a resolved provider.
pub fn build_chat_client(provider: &ActiveProvider, timeout_ms: u64) -> Arc<dyn ChatClient> {
    Arc::new(OpenAiCompatClient::new(
        provider.api_url.clone(),
        provider.model.clone(),
        provider.api_key.clone(),
        Duration::from_millis(timeout_ms),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            name: name.into(),
            model: format!("{name}-model"),
            api_url: None,
            api_key: api_key.map(String::from),
            api_key_env: None,
        }
    }

    #[test]
    fn selection_is_first_configured_entry() {
        let providers = vec![
            provider("google", None),
            provider("deepseek", Some("sk-deepseek")),
            provider("openai", Some("sk-openai")),
        ];
        let active = select_provider(&providers).unwrap();
        assert_eq!(active.name, "deepseek");
        assert_eq!(active.api_key, "sk-deepseek");
    }

    #[test]
    fn selection_empty_when_nothing_configured() {
        let providers = vec![provider("google", None), provider("openai", None)];
        assert!(select_provider(&providers).is_none());
    }

    #[test]
    fn empty_key_does_not_count_as_configured() {
        let providers = vec![provider("google", Some("")), provider("openai", Some("sk-x"))];
        let active = select_provider(&providers).unwrap();
        assert_eq!(active.name, "openai");
    }

    #[test]
    fn env_var_credential_is_picked_up() {
        let var = "LIFELINE_TEST_PROVIDER_KEY";
        std::env::set_var(var, "sk-from-env");
        let config = ProviderConfig {
            name: "openai".into(),
            model: "gpt-4o".into(),
            api_url: None,
            api_key: None,
            api_key_env: Some(var.into()),
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-from-env"));
        std::env::remove_var(var);
    }

    #[test]
    fn explicit_key_beats_env_var() {
        let config = ProviderConfig {
            name: "openai".into(),
            model: "gpt-4o".into(),
            api_url: None,
            api_key: Some("sk-explicit".into()),
            api_key_env: Some("LIFELINE_TEST_UNSET_VAR".into()),
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn default_provider_order_matches_original_service() {
        let config = BrainConfig::default();
        let names: Vec<_> = config.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["google", "deepseek", "openai"]);
        assert_eq!(config.max_history_turns, 10);
        assert_eq!(config.max_tokens, 1000);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn deserialize_config_from_toml() {
        let toml_str = r#"
max_history_turns = 6
temperature = 0.2

[[providers]]
name = "openai"
model = "gpt-4o-mini"
api_key = "sk-test"
"#;
        let config: BrainConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_history_turns, 6);
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].model, "gpt-4o-mini");
        // Unset fields fall back to defaults
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.timeout_ms, 30_000);
    }
}
