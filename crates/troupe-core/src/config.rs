use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TroupeError};

/// Top-level Troupe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    #[serde(default)]
    pub reflection: ReflectionConfig,
}

/// Model backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    pub model_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Settings for the generate/critique reflection loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionConfig {
    /// Maximum generate/critique steps before giving up.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Bound on each conversation buffer (first message stays pinned).
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_steps() -> usize {
    4
}

fn default_history_capacity() -> usize {
    3
}

impl AppConfig {
    /// Load config from a TOML file, with env var expansion.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| TroupeError::ConfigNotFound(path.display().to_string()))?;

        // Expand ${ENV_VAR} references
        let expanded = expand_env_vars(&content);

        toml::from_str(&expanded).map_err(|e| TroupeError::Config(e.to_string()))
    }
}

fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }
            match std::env::var(&var_name) {
                Ok(val) => result.push_str(&val),
                Err(_) => {
                    // Keep original if env var not set
                    result.push_str(&format!("${{{}}}", var_name));
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("TEST_TROUPE_VAR", "hello");
        let result = expand_env_vars("key = \"${TEST_TROUPE_VAR}\"");
        assert_eq!(result, "key = \"hello\"");
        std::env::remove_var("TEST_TROUPE_VAR");
    }

    #[test]
    fn test_expand_env_vars_missing() {
        let result = expand_env_vars("key = \"${NONEXISTENT_TROUPE_VAR}\"");
        assert_eq!(result, "key = \"${NONEXISTENT_TROUPE_VAR}\"");
    }

    #[test]
    fn test_defaults_from_minimal_toml() {
        let toml_str = r#"
[model]
model_id = "llama-3.3-70b-versatile"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.provider, "openai");
        assert_eq!(config.model.max_tokens, 4096);
        assert!(config.model.temperature.is_none());
        assert_eq!(config.reflection.max_steps, 4);
        assert_eq!(config.reflection.history_capacity, 3);
    }
}
