//! Troupe — compose agents into a dependency graph and run it.
//!
//! A [`Crew`] owns a set of [`Agent`]s and the directed edges between them.
//! Running a crew topologically schedules the agents, runs each once, and
//! feeds every agent's output into the accumulated context of its direct
//! dependents. Agents may carry tools described by coarse-typed
//! [`ToolSchema`]s; arguments a model proposes are normalized by a
//! permissive, never-fail coercion layer before invocation. A separate
//! [`ReflectionLoop`] drives a bounded generate/critique cycle over two
//! pinned-first conversation buffers.

pub use troupe_agent::{
    Agent, AgentId, AgentOutput, CompletionRunner, Crew, CrewReport, ReflectionLoop, TaskRunner,
    STOP_SENTINEL,
};
pub use troupe_core::{
    AppConfig, ChatHistory, ChatMessage, FixedFirstChatHistory, Result, Role, RunId,
    ToolDefinition, ToolResult, TroupeError,
};
pub use troupe_core::config::{ModelConfig, ReflectionConfig};
pub use troupe_core::traits::LlmClient;
pub use troupe_llm::{create_client, OpenAiClient};
pub use troupe_tools::{coerce_arguments, FnTool, Param, ParamKind, Tool, ToolRegistry, ToolSchema};

pub mod builtin {
    pub use troupe_tools::builtin::{WebSearchTool, WriteMarkdownTool};
}
