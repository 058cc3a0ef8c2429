//! Message types for the example conversation editor.
//!
//! - `Message` - one chat turn: role, content, superseded choices, error annotation
//! - `Role` - speaker slot
//! - `MessageError` - failure reported by an external system, shown next to a message

use serde::{Deserialize, Serialize};
use strum::Display;

/// Speaker of a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

impl Role {
    /// The role an appended row takes after a message with this role.
    pub fn alternate(self) -> Self {
        match self {
            Role::User => Role::Assistant,
            Role::System | Role::Assistant => Role::User,
        }
    }
}

/// Which side produced a message error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    #[serde(alias = "TechFlow")]
    App,
    #[serde(alias = "openai")]
    Provider,
}

/// Error annotation attached to a single message.
///
/// This is data, not a fault: it describes a failure elsewhere (e.g. a
/// provider request) and is rendered next to the message it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageError {
    pub message: String,
    pub status: i64,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl MessageError {
    pub fn new(kind: ErrorKind, status: i64, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            kind,
        }
    }
}

/// A single chat turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Earlier contents replaced by `updateMessageChoice`, oldest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<MessageError>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            choices: None,
            error: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn with_error(mut self, error: MessageError) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of superseded contents kept for this message
    pub fn choice_count(&self) -> usize {
        self.choices.as_ref().map_or(0, Vec::len)
    }
}
