use futures::future::BoxFuture;
use serde_json::Value;

use troupe_core::error::{Result, TroupeError};
use troupe_core::types::ToolResult;

use crate::registry::Tool;
use crate::schema::{ParamKind, ToolSchema};

/// Write a string to a Markdown file. An existing file is overwritten.
pub struct WriteMarkdownTool {
    schema: ToolSchema,
}

impl WriteMarkdownTool {
    pub fn new() -> Self {
        let schema = ToolSchema::new(
            "write_markdown",
            "Write a string to a Markdown (.md) file. Overwrites the file if it exists.",
        )
        .param("content", ParamKind::String)
        .describe("The Markdown content to write")
        .param("path", ParamKind::String)
        .describe("Destination file name, e.g. 'travel_itinerary.md'");
        Self { schema }
    }
}

impl Default for WriteMarkdownTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WriteMarkdownTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn execute(&self, input: Value) -> BoxFuture<'_, Result<ToolResult>> {
        Box::pin(async move {
            let content = input["content"].as_str().ok_or_else(|| {
                TroupeError::ToolExecution {
                    tool: "write_markdown".into(),
                    message: "'content' must be a string".into(),
                }
            })?;
            let path = input["path"]
                .as_str()
                .ok_or_else(|| TroupeError::ToolExecution {
                    tool: "write_markdown".into(),
                    message: "'path' must be a string".into(),
                })?;

            tokio::fs::write(path, content)
                .await
                .map_err(|e| TroupeError::ToolExecution {
                    tool: "write_markdown".into(),
                    message: e.to_string(),
                })?;

            Ok(ToolResult::success(format!(
                "Markdown written to {}",
                path
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        let tool = WriteMarkdownTool::new();

        let result = tool
            .execute(json!({
                "content": "# Title\n\nBody.",
                "path": path.to_str().unwrap(),
            }))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Title\n\nBody."
        );
    }

    #[tokio::test]
    async fn test_missing_content_is_tool_error() {
        let tool = WriteMarkdownTool::new();
        let err = tool.execute(json!({"path": "x.md"})).await.unwrap_err();
        assert!(matches!(err, TroupeError::ToolExecution { .. }));
    }
}
