//! Built-in tools.

pub mod web_search;
pub mod write_markdown;

pub use web_search::WebSearchTool;
pub use write_markdown::WriteMarkdownTool;
