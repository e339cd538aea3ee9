//! Tool registry and the built-in tool catalog.

use crate::protocol::ToolDefinition;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Schema/version introspection.
pub const GET_SCHEMA_VERSION: &str = "get_schema_version";
/// Entity types declared in the tenant's project.
pub const LIST_ENTITY_TYPES: &str = "list_entity_types";
/// Entities of a type, optionally filtered by property values.
pub const QUERY_ENTITIES: &str = "query_entities";
/// Free-text search across the tenant's entities.
pub const SEARCH_ENTITIES: &str = "search_entities";

/// Registry of available MCP tools.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry preloaded with the built-in tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for tool in builtin_tools() {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool.
    pub fn register(&mut self, tool: ToolDefinition) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// List all tools.
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.tools.values().collect()
    }

    /// Tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The first required argument missing from `arguments`, per the tool's
/// input schema.
pub fn missing_required(tool: &ToolDefinition, arguments: &Value) -> Option<String> {
    let required = tool.input_schema.get("required")?.as_array()?;
    required
        .iter()
        .filter_map(|v| v.as_str())
        .find(|name| {
            arguments
                .get(name)
                .is_none_or(|v| v.is_null())
        })
        .map(String::from)
}

fn builtin_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_SCHEMA_VERSION.to_string(),
            description: Some("Version of the entity schema engine".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: LIST_ENTITY_TYPES.to_string(),
            description: Some("Entity types declared in the current project".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: QUERY_ENTITIES.to_string(),
            description: Some(
                "Entities of a type, optionally filtered by property values".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type_name": { "type": "string" },
                    "filters": { "type": "object" }
                },
                "required": ["type_name"]
            }),
        },
        ToolDefinition {
            name: SEARCH_ENTITIES.to_string(),
            description: Some("Free-text search across the project's entities".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
        },
    ]
}
