use troupe_tools::ToolRegistry;

/// A unit of work in a crew.
///
/// An agent holds a backstory (its system prompt), a task description, an
/// expected-output description, the tools bound to it, and the context
/// accumulated from the agents it depends on. The name is a display key;
/// uniqueness is the caller's responsibility.
#[derive(Clone, Default)]
pub struct Agent {
    pub name: String,
    pub backstory: String,
    pub task_description: String,
    pub expected_output: String,
    pub tools: ToolRegistry,
    context: String,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the backstory (used as the system prompt).
    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    /// Set the task description.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task_description = task.into();
        self
    }

    /// Set the expected-output description.
    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Bind a tool to this agent.
    pub fn with_tool(mut self, tool: impl troupe_tools::Tool) -> Self {
        self.tools.register(tool);
        self
    }

    /// Bind an already-shared tool to this agent.
    pub fn with_tool_arc(mut self, tool: std::sync::Arc<dyn troupe_tools::Tool>) -> Self {
        self.tools.register_arc(tool);
        self
    }

    /// The context accumulated from upstream agents so far.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Append context produced by an upstream agent.
    ///
    /// Context is additive: each call appends a block tagged with the
    /// producing agent's name. Nothing is ever replaced or truncated.
    pub fn receive_context(&mut self, from: &str, output: &str) {
        if !self.context.is_empty() {
            self.context.push_str("\n\n");
        }
        self.context.push_str(&format!("[from {}]\n{}", from, output));
    }

    /// Build the task prompt for this agent's run.
    pub fn build_prompt(&self) -> String {
        format!(
            "You are an AI agent. You are part of a team of agents working together to complete a task.\n\
             I'm going to give you the task description enclosed in <task_description></task_description> tags.\n\
             I'll also give you the available context from the other agents in <context></context> tags.\n\
             If the context is not available, the <context></context> tags will be empty.\n\
             You'll also receive the task expected output enclosed in\n\
             <task_expected_output></task_expected_output> tags. With all this information you need to\n\
             create the best possible response, always respecting the format described in\n\
             <task_expected_output></task_expected_output> tags. If the expected output is not available,\n\
             just create a meaningful response to complete the task.\n\
             \n\
             <task_description>\n{}\n</task_description>\n\
             \n\
             <task_expected_output>\n{}\n</task_expected_output>\n\
             \n\
             <context>\n{}\n</context>\n\
             \n\
             Your response:",
            self.task_description, self.expected_output, self.context
        )
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("tools", &self.tools.list())
            .field("context_len", &self.context.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let agent = Agent::new("writer")
            .with_backstory("You write well.")
            .with_task("Write a poem.")
            .with_expected_output("A four-line poem.");

        assert_eq!(agent.name, "writer");
        assert_eq!(agent.backstory, "You write well.");
        assert!(agent.context().is_empty());
    }

    #[test]
    fn test_context_is_additive() {
        let mut agent = Agent::new("sink");
        agent.receive_context("a", "first output");
        agent.receive_context("b", "second output");

        let ctx = agent.context();
        assert!(ctx.contains("[from a]\nfirst output"));
        assert!(ctx.contains("[from b]\nsecond output"));
        // Order matches arrival order.
        assert!(ctx.find("first output").unwrap() < ctx.find("second output").unwrap());
    }

    #[test]
    fn test_prompt_contains_sections() {
        let mut agent = Agent::new("a")
            .with_task("Summarize the findings.")
            .with_expected_output("One paragraph.");
        agent.receive_context("researcher", "Rust is fast.");

        let prompt = agent.build_prompt();
        assert!(prompt.contains("<task_description>\nSummarize the findings.\n</task_description>"));
        assert!(prompt.contains("<task_expected_output>\nOne paragraph.\n</task_expected_output>"));
        assert!(prompt.contains("Rust is fast."));
    }
}
