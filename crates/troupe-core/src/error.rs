use thiserror::Error;

#[derive(Debug, Error)]
pub enum TroupeError {
    // LLM errors
    #[error("LLM request failed: {0}")]
    LlmRequest(String),

    #[error("LLM response parse error: {0}")]
    LlmParse(String),

    // Tool errors
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool execution failed: {tool}: {message}")]
    ToolExecution { tool: String, message: String },

    // Crew errors
    #[error("Dependency cycle detected in crew '{crew}'")]
    CycleDetected { crew: String },

    #[error("Agent handle {handle} does not belong to crew '{crew}'")]
    UnknownAgent { crew: String, handle: usize },

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TroupeError>;
