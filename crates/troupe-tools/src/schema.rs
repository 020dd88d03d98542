use regex::Regex;
use serde_json::{json, Value};

use troupe_core::types::ToolDefinition;

/// Coarse type tag for a tool parameter.
///
/// Deliberately coarser than a full schema language: the sole consumer is a
/// model choosing and filling in arguments, not a strict validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    List,
    Object,
}

impl ParamKind {
    /// The model-facing tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::List => "list",
            ParamKind::Object => "object",
        }
    }

    /// Resolve a tag spelling to a kind, accepting the common family
    /// aliases. Unknown tags fall back to `String`, the conservative
    /// default for model-facing schemas.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "string" | "str" => ParamKind::String,
            "integer" | "int" => ParamKind::Integer,
            "number" | "float" | "f64" | "f32" => ParamKind::Number,
            "boolean" | "bool" => ParamKind::Boolean,
            "list" | "array" | "vec" => ParamKind::List,
            "object" | "dict" | "map" => ParamKind::Object,
            _ => ParamKind::String,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named parameter in a tool schema.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
}

/// Invocation descriptor for a tool: name, description, and a flat, ordered
/// parameter map.
///
/// A parameter is required unless it carries a default value or was declared
/// nullable. Tools are immutable once constructed; the builder methods
/// consume and return `self`.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    params: Vec<Param>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a required parameter.
    pub fn param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
            description: None,
            required: true,
            default: None,
        });
        self
    }

    /// Add a parameter with a default value. A default makes it optional.
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        kind: ParamKind,
        default: Value,
    ) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
            description: None,
            required: false,
            default: Some(default),
        });
        self
    }

    /// Add a nullable parameter. The tag comes from the first non-null
    /// alternative of the declared union; nullability makes it optional.
    pub fn nullable_param(mut self, name: impl Into<String>, alternatives: &[ParamKind]) -> Self {
        let kind = alternatives.first().copied().unwrap_or(ParamKind::String);
        self.params.push(Param {
            name: name.into(),
            kind,
            description: None,
            required: false,
            default: None,
        });
        self
    }

    /// Set the description of the most recently added parameter.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.params.last_mut() {
            last.description = Some(text.into());
        }
        self
    }

    /// Back-fill parameter descriptions from a documentation string.
    ///
    /// Scans for lines of the form `name: description` or
    /// `name (type): description`. Advisory metadata only — parameters
    /// without a matching line keep their description unset.
    pub fn with_docs(mut self, docs: &str) -> Self {
        for param in &mut self.params {
            if param.description.is_some() {
                continue;
            }
            let pattern = format!(
                r"^\s*{}\s*(?:\([^)]*\))?:\s*(.+)$",
                regex::escape(&param.name)
            );
            // The pattern is built from an escaped literal; it always compiles.
            let Ok(re) = Regex::new(&pattern) else {
                continue;
            };
            for line in docs.lines() {
                if let Some(caps) = re.captures(line) {
                    param.description = Some(caps[1].trim().to_string());
                    break;
                }
            }
        }
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names of all required parameters, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Render the wire form sent to the model backend.
    pub fn definition(&self) -> ToolDefinition {
        let mut properties = serde_json::Map::new();
        for p in &self.params {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), json!(p.kind.as_str()));
            if let Some(desc) = &p.description {
                prop.insert("description".into(), json!(desc));
            }
            if let Some(default) = &p.default {
                prop.insert("default".into(), default.clone());
            }
            properties.insert(p.name.clone(), Value::Object(prop));
        }

        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": self.required(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_schema() -> ToolSchema {
        ToolSchema::new("web_search", "Search the web.")
            .param("query", ParamKind::String)
            .param_with_default("max_results", ParamKind::Integer, json!(3))
            .nullable_param("tags", &[ParamKind::List])
    }

    #[test]
    fn test_required_derivation() {
        let schema = search_schema();
        assert_eq!(schema.required(), vec!["query"]);
    }

    #[test]
    fn test_param_kinds() {
        let schema = search_schema();
        assert_eq!(schema.get("query").unwrap().kind, ParamKind::String);
        assert_eq!(schema.get("max_results").unwrap().kind, ParamKind::Integer);
        assert_eq!(schema.get("tags").unwrap().kind, ParamKind::List);
    }

    #[test]
    fn test_nullable_union_takes_first_alternative() {
        let schema = ToolSchema::new("t", "").nullable_param(
            "mixed",
            &[ParamKind::Integer, ParamKind::String],
        );
        let p = schema.get("mixed").unwrap();
        assert_eq!(p.kind, ParamKind::Integer);
        assert!(!p.required);
    }

    #[test]
    fn test_docs_backfill() {
        let docs = "\
Performs a web search.

Args:
    query (str): The search query.
    max_results (int, optional): Maximum number of results. Defaults to 3.
";
        let schema = search_schema().with_docs(docs);
        assert_eq!(
            schema.get("query").unwrap().description.as_deref(),
            Some("The search query.")
        );
        assert_eq!(
            schema.get("max_results").unwrap().description.as_deref(),
            Some("Maximum number of results. Defaults to 3.")
        );
        // No matching doc line: description stays unset.
        assert!(schema.get("tags").unwrap().description.is_none());
    }

    #[test]
    fn test_definition_rendering() {
        let def = search_schema().definition();
        assert_eq!(def.name, "web_search");
        let props = &def.input_schema["properties"];
        assert_eq!(props["query"]["type"], "string");
        assert_eq!(props["max_results"]["default"], 3);
        assert_eq!(def.input_schema["required"], json!(["query"]));
    }

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!(ParamKind::parse("int"), ParamKind::Integer);
        assert_eq!(ParamKind::parse("ARRAY"), ParamKind::List);
        assert_eq!(ParamKind::parse("dict"), ParamKind::Object);
        assert_eq!(ParamKind::parse("float"), ParamKind::Number);
        // Unknown tags resolve to the conservative string tag.
        assert_eq!(ParamKind::parse("quaternion"), ParamKind::String);
    }

    #[test]
    fn test_params_preserve_declaration_order() {
        let schema = search_schema();
        let names: Vec<&str> = schema.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["query", "max_results", "tags"]);
    }
}
