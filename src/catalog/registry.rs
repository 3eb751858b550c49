//! Splitting retrieved tools into model-facing and invoker-facing records.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::ToolDefinition;

/// The invoker's view of a tool: just enough to route a call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathRecord {
    pub name: String,
    pub paths: String,
}

/// The model's view of a tool: everything except the invocation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaRecord {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

/// Split a ranked tool list into path records and schema records.
///
/// Pure and order-preserving; the two lists line up index-for-index with the
/// input.
pub fn split(tools: &[ToolDefinition]) -> (Vec<PathRecord>, Vec<SchemaRecord>) {
    let paths = tools
        .iter()
        .map(|t| PathRecord {
            name: t.name.clone(),
            paths: t.paths.clone(),
        })
        .collect();
    let schemas = tools
        .iter()
        .map(|t| SchemaRecord {
            name: t.name.clone(),
            description: t.description.clone(),
            extra: t.extra.clone(),
        })
        .collect();
    (paths, schemas)
}
