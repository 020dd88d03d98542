use futures::future::BoxFuture;
use serde_json::{json, Value};

use troupe_core::error::{Result, TroupeError};
use troupe_core::types::ToolResult;

use crate::registry::Tool;
use crate::schema::{ParamKind, ToolSchema};

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// Web search backed by the Tavily API.
pub struct WebSearchTool {
    api_key: String,
    http: reqwest::Client,
    schema: ToolSchema,
}

impl WebSearchTool {
    pub fn new(api_key: &str) -> Self {
        let schema = ToolSchema::new(
            "web_search",
            "Search the web for current information. Returns relevant results with snippets.",
        )
        .param("query", ParamKind::String)
        .describe("Search query")
        .param_with_default("max_results", ParamKind::Integer, json!(3))
        .describe("Maximum number of search results to return")
        .param_with_default("search_depth", ParamKind::String, json!("basic"))
        .describe("Depth of the search: \"basic\" or \"advanced\"");

        Self {
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
            schema,
        }
    }
}

impl Tool for WebSearchTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn execute(&self, input: Value) -> BoxFuture<'_, Result<ToolResult>> {
        Box::pin(async move {
            let query = input["query"]
                .as_str()
                .ok_or_else(|| TroupeError::ToolExecution {
                    tool: "web_search".into(),
                    message: "'query' must be a string".into(),
                })?;
            let max = input["max_results"].as_u64().unwrap_or(3);
            let depth = input["search_depth"].as_str().unwrap_or("basic");

            let resp = self
                .http
                .post(TAVILY_API_URL)
                .json(&json!({
                    "api_key": self.api_key,
                    "query": query,
                    "max_results": max,
                    "search_depth": depth,
                }))
                .send()
                .await
                .map_err(|e| TroupeError::ToolExecution {
                    tool: "web_search".into(),
                    message: e.to_string(),
                })?;

            let body: Value = resp.json().await.map_err(|e| TroupeError::ToolExecution {
                tool: "web_search".into(),
                message: e.to_string(),
            })?;

            let results = body["results"]
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .map(|r| {
                            format!(
                                "**{}**\n{}\nURL: {}",
                                r["title"].as_str().unwrap_or(""),
                                r["content"].as_str().unwrap_or(""),
                                r["url"].as_str().unwrap_or("")
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n\n---\n\n")
                })
                .unwrap_or_else(|| "No results found.".into());

            Ok(ToolResult::success(results))
        })
    }
}
