//! Configuration for the coordination service.

use lifeline_brain::BrainConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Brain/provider configuration.
    #[serde(default)]
    pub brain: BrainConfig,

    /// Pre-load the demo incident and responder units on startup.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            brain: BrainConfig::default(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        if config.brain.providers.iter().any(|p| p.api_key.is_some()) {
            warn!(
                "API key found in config file '{}'. For better security, \
                 use api_key_env and keep credentials in the environment.",
                path.display()
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_seeds_demo_data() {
        let config = CoordinatorConfig::default();
        assert!(config.seed_demo_data);
        assert_eq!(config.brain.providers.len(), 3);
    }

    #[test]
    fn from_file_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
seed_demo_data = false

[brain]
max_history_turns = 4

[[brain.providers]]
name = "deepseek"
model = "deepseek-chat"
api_url = "https://api.deepseek.com/v1"
api_key_env = "OPENAI_API_KEY_DEEPSEEK"
"#
        )
        .unwrap();

        let config = CoordinatorConfig::from_file(file.path()).unwrap();
        assert!(!config.seed_demo_data);
        assert_eq!(config.brain.max_history_turns, 4);
        assert_eq!(config.brain.providers.len(), 1);
        assert_eq!(config.brain.providers[0].name, "deepseek");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = CoordinatorConfig::from_file(file.path()).unwrap();
        assert!(config.seed_demo_data);
        assert_eq!(config.brain.max_tokens, 1000);
    }
}
