//! Core types shared across the crate.

pub mod answer;
pub mod message;

pub use answer::{AnswerRecord, QueryRecord, RelevantApi};
pub use message::{FunctionCall, ModelMessage, Role};
