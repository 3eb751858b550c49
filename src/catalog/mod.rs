//! Tool catalog: loading, deduplication, and similarity-ranked lookup.

pub mod registry;

pub use registry::{split, PathRecord, SchemaRecord};

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Map;
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::rank::SimilarityRanker;

/// One tool as it appears in the catalog file.
///
/// `name`, `description`, and `paths` are required; everything else (the
/// parameter schema shown to the model) rides along untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub paths: String,
    #[serde(flatten)]
    pub extra: Map<String, serde_json::Value>,
}

/// The full set of available tools, keyed by description.
///
/// Descriptions are the retrieval unit, so they double as the dedup key:
/// a duplicate description replaces the earlier definition (last one wins)
/// while keeping its first-seen position in the ranking candidate list.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    by_description: HashMap<String, ToolDefinition>,
    descriptions: Vec<String>,
}

impl ToolCatalog {
    /// Load a catalog from a JSON-lines file, one ToolDefinition per line.
    ///
    /// A malformed line is fatal: the error names the file and line number
    /// and the caller is expected to abort the whole batch.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        let mut by_description = HashMap::new();
        let mut descriptions = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let tool: ToolDefinition =
                serde_json::from_str(line).map_err(|source| AgentError::CatalogLoad {
                    path: path.display().to_string(),
                    line: idx + 1,
                    source,
                })?;
            if by_description
                .insert(tool.description.clone(), tool.clone())
                .is_none()
            {
                descriptions.push(tool.description);
            }
        }

        debug!(
            path = %path.display(),
            tools = descriptions.len(),
            "catalog loaded"
        );
        Ok(Self {
            by_description,
            descriptions,
        })
    }

    /// Number of distinct descriptions in the catalog.
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Retrieve the `k` tools most similar to `query`, best first.
    ///
    /// Ranking is delegated to the collaborator; indices it returns are
    /// mapped back onto definitions in order. Result length is
    /// `min(k, distinct descriptions)`.
    pub async fn lookup(
        &self,
        query: &str,
        k: usize,
        ranker: &dyn SimilarityRanker,
    ) -> Result<Vec<ToolDefinition>> {
        if k == 0 || self.descriptions.is_empty() {
            return Ok(Vec::new());
        }
        let indices = ranker.rank(query, &self.descriptions, k).await?;
        let tools = indices
            .into_iter()
            .filter_map(|i| self.descriptions.get(i))
            .filter_map(|d| self.by_description.get(d).cloned())
            .collect::<Vec<_>>();
        debug!(query, retrieved = tools.len(), "catalog lookup");
        Ok(tools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn duplicate_descriptions_collapse_last_wins() {
        let file = write_catalog(&[
            r#"{"name":"a","description":"same","paths":"/a"}"#,
            r#"{"name":"b","description":"same","paths":"/b"}"#,
            r#"{"name":"c","description":"other","paths":"/c"}"#,
        ]);
        let catalog = ToolCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_description["same"].name, "b");
    }

    #[test]
    fn malformed_line_reports_location() {
        let file = write_catalog(&[
            r#"{"name":"a","description":"d","paths":"/a"}"#,
            "not json",
        ]);
        let err = ToolCatalog::load(file.path()).unwrap_err();
        match err {
            AgentError::CatalogLoad { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let file = write_catalog(&[
            r#"{"name":"a","description":"d","paths":"/a"}"#,
            "",
            r#"{"name":"b","description":"e","paths":"/b"}"#,
        ]);
        let catalog = ToolCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn extra_schema_fields_are_preserved() {
        let file = write_catalog(&[
            r#"{"name":"a","description":"d","paths":"/a","parameters":{"type":"object"}}"#,
        ]);
        let catalog = ToolCatalog::load(file.path()).unwrap();
        let tool = &catalog.by_description["d"];
        assert!(tool.extra.contains_key("parameters"));
    }
}
