use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the widget's conversation log. Structured messages
/// carry rendered HTML instead of plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub is_structured: bool,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sender: Sender::User,
            is_structured: false,
        }
    }

    pub fn bot(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sender: Sender::Bot,
            is_structured: false,
        }
    }

    pub fn bot_structured(html: &str) -> Self {
        Self {
            text: html.to_string(),
            sender: Sender::Bot,
            is_structured: true,
        }
    }
}
