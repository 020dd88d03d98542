/// A named provider preset for OpenAI-compatible APIs.
pub struct ProviderPreset {
    pub default_base_url: &'static str,
    pub needs_api_key: bool,
}

/// Look up a provider preset by name.
pub fn get_preset(provider: &str) -> Option<ProviderPreset> {
    match provider {
        "openai" => Some(ProviderPreset {
            default_base_url: "https://api.openai.com/v1/chat/completions",
            needs_api_key: true,
        }),
        "groq" => Some(ProviderPreset {
            default_base_url: "https://api.groq.com/openai/v1/chat/completions",
            needs_api_key: true,
        }),
        "ollama" => Some(ProviderPreset {
            default_base_url: "http://localhost:11434/v1/chat/completions",
            needs_api_key: false,
        }),
        "openrouter" => Some(ProviderPreset {
            default_base_url: "https://openrouter.ai/api/v1/chat/completions",
            needs_api_key: true,
        }),
        _ => None,
    }
}

/// The conventional API-key environment variable for a provider.
pub fn api_key_env_var(provider: &str) -> String {
    format!("{}_API_KEY", provider.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_presets() {
        assert!(get_preset("groq").unwrap().needs_api_key);
        assert!(!get_preset("ollama").unwrap().needs_api_key);
        assert!(get_preset("unknown").is_none());
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(api_key_env_var("groq"), "GROQ_API_KEY");
    }
}
