//! Shared mocks for Troupe tests: a scripted LLM client and a scripted
//! task runner.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::BoxFuture;

use troupe_agent::TaskRunner;
use troupe_core::config::ModelConfig;
use troupe_core::error::{Result, TroupeError};
use troupe_core::traits::LlmClient;
use troupe_core::types::{ChatMessage, ToolDefinition};
use troupe_tools::ToolRegistry;

/// An `LlmClient` that replays a fixed script of responses and records the
/// message lists it was called with.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(responses: I) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The message lists of every completion request, in order.
    pub fn recorded_calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

impl LlmClient for ScriptedLlm {
    fn complete(
        &self,
        _config: &ModelConfig,
        messages: Vec<ChatMessage>,
        _tools: &[ToolDefinition],
    ) -> BoxFuture<'_, Result<String>> {
        self.calls.lock().unwrap().push(messages);
        let next = self.responses.lock().unwrap().pop_front();
        Box::pin(async move {
            next.ok_or_else(|| TroupeError::LlmRequest("scripted responses exhausted".into()))
        })
    }
}

/// A `TaskRunner` that maps agent system prompts to canned outputs and
/// counts invocations.
///
/// Agents whose system prompt (backstory) has no scripted entry receive
/// `"<system_prompt> output"`.
pub struct ScriptedRunner {
    outputs: HashMap<String, String>,
    invocations: AtomicUsize,
    /// When set, every run fails with this message.
    failure: Option<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            invocations: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Script a canned output for an agent (keyed by its backstory).
    pub fn with_output(mut self, key: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), output.into());
        self
    }

    /// Make every run fail.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outputs: HashMap::new(),
            invocations: AtomicUsize::new(0),
            failure: Some(message.into()),
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        system_prompt: &'a str,
        _prompt: &'a str,
        _tools: &'a ToolRegistry,
    ) -> BoxFuture<'a, Result<String>> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        let result = match &self.failure {
            Some(msg) => Err(TroupeError::LlmRequest(msg.clone())),
            None => Ok(self
                .outputs
                .get(system_prompt)
                .cloned()
                .unwrap_or_else(|| format!("{} output", system_prompt))),
        };
        Box::pin(async move { result })
    }
}
