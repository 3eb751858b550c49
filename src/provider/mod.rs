//! Chat-completion collaborator trait and implementations.

pub mod ernie;
pub mod http;

use async_trait::async_trait;
use serde_json::Map;

use crate::catalog::SchemaRecord;
use crate::error::Result;
use crate::types::ModelMessage;

/// A tool call extracted from a model response.
///
/// `arguments` is the parsed form used for dispatch; `raw_arguments` is the
/// JSON string exactly as the model produced it, echoed back on the next
/// turn's assistant message.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInvocation {
    pub name: String,
    pub arguments: Map<String, serde_json::Value>,
    pub raw_arguments: String,
}

/// Outcome of one chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatTurn {
    /// The model produced a final textual answer.
    Answer(String),
    /// The model asked for a tool to be invoked.
    ToolCall(FunctionInvocation),
}

/// Core trait implemented by chat-completion backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name, for logging.
    fn provider_name(&self) -> &str;

    /// Run one completion over the conversation so far, offering `functions`
    /// as callable tools.
    async fn complete(
        &self,
        messages: &[ModelMessage],
        functions: &[SchemaRecord],
    ) -> Result<ChatTurn>;
}
