//! Public types for the chat API
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::intent::Reply;

/// Body of `POST /api/chat`. The message is kept as raw JSON since
/// clients may send it missing or as something other than a string,
/// both of which are answered with the fallback reply.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    pub fn new(message: &str) -> Self {
        Self {
            message: Some(Value::String(message.to_string())),
        }
    }

    /// The utterance, if the client actually sent text.
    pub fn utterance(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }
}

/// Sent for both successful and failed requests. On failure the
/// response is always text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: Reply,
}

impl ChatResponse {
    pub fn new(response: Reply) -> Self {
        Self { response }
    }
}
