//! Persisted per-query result types.

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// One tool call the model attempted during a conversation.
///
/// Recorded before name resolution, so calls to tools that turn out not to
/// exist are kept as a trace of model intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelevantApi {
    pub api_name: String,
    pub required_parameters: Map<String, serde_json::Value>,
}

/// The single output line written per query, append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub query: String,
    pub query_id: serde_json::Value,
    pub result: String,
    /// Field name kept verbatim from the established output format.
    #[serde(rename = "relevant APIs")]
    pub relevant_apis: Vec<RelevantApi>,
}

/// One entry of the input dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub qid: serde_json::Value,
}
