use std::sync::Arc;

use futures::future::BoxFuture;

use troupe_core::config::ModelConfig;
use troupe_core::error::Result;
use troupe_core::traits::LlmClient;
use troupe_core::types::ChatMessage;
use troupe_tools::ToolRegistry;

/// Boundary to whatever executes one agent's task.
///
/// The reasoning loop deciding when to call a tool versus emit a final
/// answer lives behind this trait: it consumes a tool registry and returns
/// text.
pub trait TaskRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
        tools: &'a ToolRegistry,
    ) -> BoxFuture<'a, Result<String>>;
}

/// The minimal in-tree runner: a single completion with the registry's
/// tool definitions attached to the request.
pub struct CompletionRunner {
    llm: Arc<dyn LlmClient>,
    config: ModelConfig,
}

impl CompletionRunner {
    pub fn new(llm: Arc<dyn LlmClient>, config: ModelConfig) -> Self {
        Self { llm, config }
    }
}

impl TaskRunner for CompletionRunner {
    fn run<'a>(
        &'a self,
        system_prompt: &'a str,
        prompt: &'a str,
        tools: &'a ToolRegistry,
    ) -> BoxFuture<'a, Result<String>> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(prompt),
        ];
        let definitions = tools.definitions();
        Box::pin(async move {
            self.llm
                .complete(&self.config, messages, &definitions)
                .await
        })
    }
}
