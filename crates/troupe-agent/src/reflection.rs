//! Generate/critique reflection loop.
//!
//! Two independent bounded histories drive the loop: the generation side
//! produces a candidate, the reflection side critiques it, and the critique
//! feeds back as the next generation turn. Both buffers pin their system
//! prompt and forget older turns, so each model call's context stays within
//! a stable size envelope no matter how many steps run.

use std::sync::Arc;

use tracing::{debug, info};

use troupe_core::config::{ModelConfig, ReflectionConfig};
use troupe_core::error::Result;
use troupe_core::history::FixedFirstChatHistory;
use troupe_core::traits::LlmClient;
use troupe_core::types::{ChatMessage, Role};

/// Critique token that terminates the loop.
pub const STOP_SENTINEL: &str = "<OK>";

const BASE_GENERATION_SYSTEM_PROMPT: &str = "\
Your task is to generate the best content possible for the user's request.
If the user provides critique, respond with a revised version of your previous attempt.
You must always output the revised content.";

const BASE_REFLECTION_SYSTEM_PROMPT: &str = "\
You are tasked with generating critique and recommendations for the user's generated content.
If the content has something wrong or something to be improved, output a list of recommendations
and critiques. If the content is fine and there is nothing to change, output this: <OK>";

/// A bounded generate -> critique -> refine cycle.
pub struct ReflectionLoop {
    llm: Arc<dyn LlmClient>,
    config: ModelConfig,
    settings: ReflectionConfig,
}

impl ReflectionLoop {
    pub fn new(llm: Arc<dyn LlmClient>, config: ModelConfig) -> Self {
        Self {
            llm,
            config,
            settings: ReflectionConfig::default(),
        }
    }

    pub fn with_settings(mut self, settings: ReflectionConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Run the loop for at most `max_steps` steps.
    ///
    /// The extra system prompts are prepended to the built-in base prompts.
    /// Returns the latest generation — never the critique. If the critique
    /// contains [`STOP_SENTINEL`] the loop ends early.
    pub async fn run(
        &self,
        user_msg: &str,
        generation_system_prompt: &str,
        reflection_system_prompt: &str,
    ) -> Result<String> {
        let capacity = Some(self.settings.history_capacity);

        let gen_system = join_prompts(generation_system_prompt, BASE_GENERATION_SYSTEM_PROMPT);
        let refl_system = join_prompts(reflection_system_prompt, BASE_REFLECTION_SYSTEM_PROMPT);

        let mut generation_history = FixedFirstChatHistory::with_messages(
            vec![ChatMessage::system(gen_system), ChatMessage::user(user_msg)],
            capacity,
        );
        let mut reflection_history = FixedFirstChatHistory::with_messages(
            vec![ChatMessage::system(refl_system)],
            capacity,
        );

        let mut generation = String::new();

        for step in 0..self.settings.max_steps {
            debug!(step, max_steps = self.settings.max_steps, "reflection step");

            generation = self
                .llm
                .complete(&self.config, generation_history.to_messages(), &[])
                .await?;
            generation_history.push_text(Role::Assistant, generation.clone());
            reflection_history.push_text(Role::User, generation.clone());

            let critique = self
                .llm
                .complete(&self.config, reflection_history.to_messages(), &[])
                .await?;

            if critique.contains(STOP_SENTINEL) {
                info!(step, "stop sentinel found, ending reflection loop");
                break;
            }

            generation_history.push_text(Role::User, critique.clone());
            reflection_history.push_text(Role::Assistant, critique);
        }

        Ok(generation)
    }
}

fn join_prompts(extra: &str, base: &str) -> String {
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{}\n\n{}", extra, base)
    }
}
