//! Tool execution against the entity store.
//!
//! Executors return typed JSON payloads; the dispatcher serializes them into
//! the double-encoded text block at the protocol boundary.

use crate::error::ToolError;
use crate::protocol::RequestContext;
use crate::tools;
use lattice_core::PropertyValue;
use lattice_store::EntityStore;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Executes built-in tools.
pub struct ToolExecutor {
    store: Arc<dyn EntityStore>,
}

impl ToolExecutor {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Run a tool. Argument presence is validated by the dispatcher before
    /// this is called; value-level validation (filter coercion) happens here.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        name: &str,
        arguments: &Value,
    ) -> Result<Value, ToolError> {
        match name {
            tools::GET_SCHEMA_VERSION => {
                let version = self.store.schema_version().await?;
                Ok(json!(version))
            }
            tools::LIST_ENTITY_TYPES => {
                let project = require_project(ctx)?;
                let types = self.store.list_entity_types(project).await?;
                Ok(json!({ "entity_types": types }))
            }
            tools::QUERY_ENTITIES => {
                let project = require_project(ctx)?;
                // Presence already checked against the input schema.
                let type_name = arguments
                    .get("type_name")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let filters = self.coerce_filters(project, type_name, arguments).await?;
                let entities = self
                    .store
                    .query_entities(project, type_name, &filters)
                    .await?;
                Ok(json!({ "entities": entities }))
            }
            tools::SEARCH_ENTITIES => {
                let project = require_project(ctx)?;
                let query = arguments
                    .get("query")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let entities = self.store.search_entities(project, query).await?;
                Ok(json!({ "entities": entities }))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Coerce the raw `filters` object against the declared property kinds of
    /// the entity type. Querying an unknown type with no filters stays
    /// empty-result tolerant; filtering against one is a params error.
    async fn coerce_filters(
        &self,
        project: &str,
        type_name: &str,
        arguments: &Value,
    ) -> Result<BTreeMap<String, PropertyValue>, ToolError> {
        let mut coerced = BTreeMap::new();
        let Some(raw) = arguments.get("filters").and_then(Value::as_object) else {
            return Ok(coerced);
        };
        if raw.is_empty() {
            return Ok(coerced);
        }

        let def = self
            .store
            .entity_type(project, type_name)
            .await?
            .ok_or_else(|| ToolError::UnknownProperty {
                field: raw.keys().next().cloned().unwrap_or_default(),
                type_name: type_name.to_string(),
            })?;

        for (field, value) in raw {
            let kind = def
                .properties
                .get(field)
                .copied()
                .ok_or_else(|| ToolError::UnknownProperty {
                    field: field.clone(),
                    type_name: type_name.to_string(),
                })?;
            coerced.insert(field.clone(), kind.coerce(field, value)?);
        }
        Ok(coerced)
    }
}

fn require_project(ctx: &RequestContext) -> Result<&str, ToolError> {
    ctx.project_id.as_deref().ok_or(ToolError::MissingProject)
}
