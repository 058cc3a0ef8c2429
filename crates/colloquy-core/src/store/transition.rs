use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::error::{Error, Result};
use crate::messages::{Message, MessageError, Role};

/// A named request to change a message sequence.
///
/// Serialized tagged by `"type"` so transition logs can be written, read and
/// replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Transition {
    AddMessage {
        message: Message,
    },

    InsertMessage {
        message: Message,
        index: usize,
    },

    DeleteMessage {
        index: usize,
    },

    ResetMessages,

    UpdateMessage {
        index: usize,
        #[serde(rename = "message")]
        content: String,
    },

    UpdateMessageRole {
        index: usize,
        role: Role,
    },

    AddUserMessage {
        #[serde(rename = "message")]
        content: String,
    },

    /// Replace the last message with an assistant message built from the
    /// concatenated fragments.
    UpdateLatestBotMessage {
        #[serde(rename = "responseStream")]
        chunks: Vec<String>,
    },

    SetErrorMessage {
        index: usize,
        #[serde(default)]
        error: Option<MessageError>,
    },

    UpdateMessageChoice {
        index: usize,
        #[serde(rename = "message")]
        content: String,
    },
}

impl Transition {
    /// Every kind tag the store understands.
    pub const KINDS: [&'static str; 10] = [
        "addMessage",
        "insertMessage",
        "deleteMessage",
        "resetMessages",
        "updateMessage",
        "updateMessageRole",
        "addUserMessage",
        "updateLatestBotMessage",
        "setErrorMessage",
        "updateMessageChoice",
    ];

    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Decode a transition, rejecting unknown kinds with
    /// [`Error::UnsupportedTransition`] before looking at the payload.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let kind = match value.get("type") {
            Some(serde_json::Value::String(kind)) => kind.clone(),
            Some(other) => return Err(Error::UnsupportedTransition(other.to_string())),
            None => {
                return Err(Error::UnsupportedTransition(
                    "<missing type tag>".to_string(),
                ));
            }
        };
        if !Self::KINDS.contains(&kind.as_str()) {
            return Err(Error::UnsupportedTransition(kind));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Parse a JSON Lines transition log; blank lines are skipped.
    pub fn parse_log(text: &str) -> Result<Vec<Self>> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Self::from_json)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Transition::ResetMessages, json!({"type": "resetMessages"}))]
    #[case(
        Transition::UpdateMessage { index: 1, content: "Hello".to_string() },
        json!({"type": "updateMessage", "index": 1, "message": "Hello"})
    )]
    #[case(
        Transition::UpdateLatestBotMessage { chunks: vec!["Hel".to_string(), "lo".to_string()] },
        json!({"type": "updateLatestBotMessage", "responseStream": ["Hel", "lo"]})
    )]
    #[case(
        Transition::UpdateMessageRole { index: 0, role: Role::Assistant },
        json!({"type": "updateMessageRole", "index": 0, "role": "assistant"})
    )]
    #[case(
        Transition::SetErrorMessage { index: 2, error: None },
        json!({"type": "setErrorMessage", "index": 2, "error": null})
    )]
    fn test_wire_shape(#[case] transition: Transition, #[case] expected: serde_json::Value) {
        assert_eq!(serde_json::to_value(&transition).unwrap(), expected);
        assert_eq!(Transition::from_value(expected).unwrap(), transition);
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let transitions = [
            Transition::AddMessage {
                message: Message::user("a"),
            },
            Transition::InsertMessage {
                message: Message::user("a"),
                index: 0,
            },
            Transition::DeleteMessage { index: 0 },
            Transition::ResetMessages,
            Transition::UpdateMessage {
                index: 0,
                content: String::new(),
            },
            Transition::UpdateMessageRole {
                index: 0,
                role: Role::User,
            },
            Transition::AddUserMessage {
                content: String::new(),
            },
            Transition::UpdateLatestBotMessage { chunks: vec![] },
            Transition::SetErrorMessage {
                index: 0,
                error: None,
            },
            Transition::UpdateMessageChoice {
                index: 0,
                content: String::new(),
            },
        ];

        for (transition, kind) in transitions.iter().zip(Transition::KINDS) {
            assert_eq!(transition.kind(), kind);
            let value = serde_json::to_value(transition).unwrap();
            assert_eq!(value["type"], kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let err = Transition::from_json(r#"{"type": "renameMessage", "index": 0}"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransition(kind) if kind == "renameMessage"));
    }

    #[test]
    fn test_missing_tag_is_unsupported() {
        let err = Transition::from_json(r#"{"index": 0}"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTransition(_)));
    }

    #[test]
    fn test_known_kind_with_bad_payload_is_json_error() {
        let err = Transition::from_json(r#"{"type": "deleteMessage"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_set_error_without_error_field_clears() {
        let transition = Transition::from_json(r#"{"type": "setErrorMessage", "index": 3}"#).unwrap();
        assert_eq!(
            transition,
            Transition::SetErrorMessage {
                index: 3,
                error: None
            }
        );
    }

    #[test]
    fn test_parse_log_skips_blank_lines() {
        let log = r#"
{"type": "addUserMessage", "message": "Hi"}

{"type": "deleteMessage", "index": 0}
"#;
        let transitions = Transition::parse_log(log).unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[1], Transition::DeleteMessage { index: 0 });
    }
}
