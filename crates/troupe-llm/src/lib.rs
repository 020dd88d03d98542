pub mod openai;
pub mod presets;

use troupe_core::config::ModelConfig;
use troupe_core::traits::LlmClient;

pub use openai::OpenAiClient;

/// Create an LLM client for a model config.
///
/// Everything speaks the OpenAI-compatible chat completions dialect; the
/// provider name selects a base URL preset (openai, groq, ollama,
/// openrouter) unless the config overrides it.
pub fn create_client(_config: &ModelConfig) -> Box<dyn LlmClient> {
    Box::new(OpenAiClient::new())
}
