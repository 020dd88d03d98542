use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use troupe_core::error::{Result, TroupeError};
use troupe_core::types::{ToolDefinition, ToolResult};

use crate::coerce::coerce_arguments;
use crate::schema::ToolSchema;

/// A named, schema-described callable an agent may invoke.
pub trait Tool: Send + Sync + 'static {
    /// The invocation descriptor for this tool.
    fn schema(&self) -> &ToolSchema;

    /// Tool name (used in model tool calls).
    fn name(&self) -> &str {
        &self.schema().name
    }

    /// Execute the tool with a coerced argument object.
    fn execute(&self, input: Value) -> BoxFuture<'_, Result<ToolResult>>;
}

type ToolFn = dyn Fn(Value) -> BoxFuture<'static, Result<ToolResult>> + Send + Sync;

/// A tool built from a schema and an async closure.
///
/// The closest Rust rendition of wrapping a bare function: the schema is
/// stated explicitly since signatures cannot be introspected at runtime.
pub struct FnTool {
    schema: ToolSchema,
    f: Box<ToolFn>,
}

impl FnTool {
    pub fn new<F>(schema: ToolSchema, f: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, Result<ToolResult>> + Send + Sync + 'static,
    {
        Self {
            schema,
            f: Box::new(f),
        }
    }
}

impl Tool for FnTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn execute(&self, input: Value) -> BoxFuture<'_, Result<ToolResult>> {
        (self.f)(input)
    }
}

/// Registry of available tools.
///
/// Insertion order is preserved so the definitions sent to the model are
/// stable for a fixed construction sequence.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: impl Tool) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        if let Some(pos) = self.tools.iter().position(|t| t.name() == tool.name()) {
            self.tools[pos] = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List registered tool names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get tool definitions for sending to the LLM.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.schema().definition()).collect()
    }

    /// Execute a tool by name, coercing arguments against its schema first.
    pub async fn execute(&self, name: &str, input: Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| TroupeError::ToolNotFound(name.to_string()))?;

        let input = match input {
            Value::Object(map) => Value::Object(coerce_arguments(map, tool.schema())),
            other => other,
        };

        tool.execute(input).await
    }
}
