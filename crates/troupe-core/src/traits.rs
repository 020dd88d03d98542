use futures::future::BoxFuture;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::{ChatMessage, ToolDefinition};

/// LLM client — a single opaque text completion.
///
/// The exchange may fail; failures propagate to the caller and are never
/// retried here.
pub trait LlmClient: Send + Sync + 'static {
    /// Send role-tagged messages (and the tool definitions visible to the
    /// model) and receive one text completion back.
    fn complete(
        &self,
        config: &ModelConfig,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
    ) -> BoxFuture<'_, Result<String>>;
}
