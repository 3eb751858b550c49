//! Shared test doubles for the chat and ranking collaborators.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};
use toolrun::catalog::SchemaRecord;
use toolrun::error::{AgentError, Result};
use toolrun::provider::{ChatProvider, ChatTurn, FunctionInvocation};
use toolrun::rank::SimilarityRanker;
use toolrun::types::ModelMessage;

/// Provider that replays queued outcomes and captures every request.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<ChatTurn>>>,
    requests: Mutex<Vec<CapturedRequest>>,
}

#[derive(Clone)]
pub struct CapturedRequest {
    pub messages: Vec<ModelMessage>,
    pub function_names: Vec<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_answer(&self, text: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(ChatTurn::Answer(text.to_string())));
    }

    pub fn queue_tool_call(&self, name: &str, arguments: Value) {
        let map: Map<String, Value> = match arguments {
            Value::Object(map) => map,
            other => panic!("tool call arguments must be an object, got {other}"),
        };
        let raw = serde_json::to_string(&map).unwrap();
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(ChatTurn::ToolCall(FunctionInvocation {
                name: name.to_string(),
                arguments: map,
                raw_arguments: raw,
            })));
    }

    pub fn queue_error(&self, message: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(AgentError::ChatService(message.to_string())));
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[ModelMessage],
        functions: &[SchemaRecord],
    ) -> Result<ChatTurn> {
        self.requests.lock().unwrap().push(CapturedRequest {
            messages: messages.to_vec(),
            function_names: functions.iter().map(|f| f.name.clone()).collect(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::ChatService("script exhausted".to_string())))
    }
}

/// Ranker that always returns the same indices, clipped to `k` and to the
/// candidate list.
pub struct FixedRanker {
    indices: Vec<usize>,
}

impl FixedRanker {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Identity ranking over the whole candidate list.
    pub fn identity() -> Self {
        Self {
            indices: (0..usize::MAX).take(64).collect(),
        }
    }
}

#[async_trait]
impl SimilarityRanker for FixedRanker {
    async fn rank(&self, _query: &str, candidates: &[String], k: usize) -> Result<Vec<usize>> {
        Ok(self
            .indices
            .iter()
            .copied()
            .filter(|&i| i < candidates.len())
            .take(k)
            .collect())
    }
}
