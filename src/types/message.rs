//! Message types for model communication.
//!
//! These serialize directly to the ERNIE function-calling wire format, so
//! the shapes here are exactly what goes over HTTP.

use serde::{Deserialize, Serialize};

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMessage {
    pub role: Role,
    pub content: String,
    /// Set on `function` messages: the name of the tool that produced the
    /// content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Set on assistant messages that requested a tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl ModelMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            name: None,
            function_call: None,
        }
    }

    /// Create a plain-text assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            name: None,
            function_call: None,
        }
    }

    /// Create the assistant message echoing a tool-call request back to the
    /// model on the next turn.
    pub fn assistant_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            name: None,
            function_call: Some(call),
        }
    }

    /// Create a `function` message carrying a tool's result.
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: content.into(),
            name: Some(name.into()),
            function_call: None,
        }
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Function,
}

/// A tool call as it appears on the wire: the arguments stay a JSON-encoded
/// string, exactly as the model produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}
