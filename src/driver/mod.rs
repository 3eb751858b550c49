//! The multi-turn tool-calling conversation loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{PathRecord, SchemaRecord};
use crate::invoker::PluginInvoker;
use crate::provider::{ChatProvider, ChatTurn};
use crate::types::{AnswerRecord, FunctionCall, ModelMessage, RelevantApi};

/// Completed tool-invocation turns allowed per query.
pub const MAX_TOOL_TURNS: usize = 10;

/// Courtesy pause between model requests. Not correctness-critical.
pub const TURN_PAUSE: Duration = Duration::from_millis(500);

/// Result recorded when the conversation ends without a usable answer.
pub const FALLBACK_ANSWER: &str = "Sorry, I was unable to answer your question.";

/// Drives one query through the model/tool loop.
///
/// Each [`run`](ConversationDriver::run) invocation owns its conversation
/// state exclusively; nothing is shared across queries.
pub struct ConversationDriver {
    provider: Arc<dyn ChatProvider>,
    invoker: Arc<PluginInvoker>,
    max_turns: usize,
    turn_pause: Duration,
}

impl ConversationDriver {
    pub fn new(provider: Arc<dyn ChatProvider>, invoker: Arc<PluginInvoker>) -> Self {
        Self {
            provider,
            invoker,
            max_turns: MAX_TOOL_TURNS,
            turn_pause: TURN_PAUSE,
        }
    }

    /// Override the inter-turn pause (tests shrink it to zero).
    pub fn with_turn_pause(mut self, pause: Duration) -> Self {
        self.turn_pause = pause;
        self
    }

    /// Run the conversation for one query, producing its answer record.
    ///
    /// Terminates on the first textual answer, on a chat-service failure, or
    /// after [`MAX_TOOL_TURNS`] completed tool invocations. A tool name the
    /// model invented (absent from `paths`) is retried without penalty: no
    /// message is appended and the turn counter stays put, but the attempt is
    /// still recorded in `relevant_apis` as a trace of model intent.
    pub async fn run(
        &self,
        query: &str,
        query_id: serde_json::Value,
        paths: &[PathRecord],
        schemas: &[SchemaRecord],
    ) -> AnswerRecord {
        let run_id = Uuid::new_v4();
        info!(%run_id, query, "conversation start");

        let mut messages = vec![ModelMessage::user(query)];
        let mut relevant_apis: Vec<RelevantApi> = Vec::new();
        let mut result: Option<String> = None;

        let mut turns = 0usize;
        while turns < self.max_turns {
            let outcome = match self.provider.complete(&messages, schemas).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(%run_id, error = %err, "chat request failed, ending conversation");
                    break;
                }
            };

            let call = match outcome {
                ChatTurn::Answer(text) => {
                    info!(%run_id, "final answer produced");
                    result = Some(text);
                    break;
                }
                ChatTurn::ToolCall(call) => call,
            };

            // Recorded before resolution, so hallucinated names land in the
            // trace too.
            relevant_apis.push(RelevantApi {
                api_name: call.name.clone(),
                required_parameters: call.arguments.clone(),
            });
            debug!(%run_id, tool = %call.name, "tool call requested");

            let Some(path) = paths.iter().find(|p| p.name == call.name) else {
                warn!(%run_id, tool = %call.name, "model requested a nonexistent tool");
                continue;
            };

            let tool_result = self.invoker.invoke(&path.paths, &call.arguments).await;
            debug!(%run_id, tool = %call.name, "tool call completed");

            let function_content =
                serde_json::json!({ "return": tool_result }).to_string();
            messages.push(ModelMessage::assistant_call(FunctionCall {
                name: call.name.clone(),
                arguments: call.raw_arguments,
            }));
            messages.push(ModelMessage::function(call.name, function_content));

            turns += 1;
            time::sleep(self.turn_pause).await;
        }

        AnswerRecord {
            query: query.to_string(),
            query_id,
            result: result.unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
            relevant_apis,
        }
    }
}
