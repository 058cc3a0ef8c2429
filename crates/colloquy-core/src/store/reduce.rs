use tracing::debug;

use crate::error::{Error, Result};
use crate::messages::{Message, MessageError, Role};
use crate::store::transition::Transition;

/// Apply one transition to a message sequence.
///
/// The input is never modified; the returned vector is a fresh copy with the
/// transition's effect applied.
pub fn apply(messages: &[Message], transition: Transition) -> Result<Vec<Message>> {
    debug!(
        target: "colloquy::store",
        kind = transition.kind(),
        len = messages.len(),
        "Applying transition"
    );

    match transition {
        Transition::AddMessage { message } => Ok(appended(messages, message)),

        Transition::InsertMessage { message, index } => {
            Ok(handle_insert_message(messages, message, index))
        }

        Transition::DeleteMessage { index } => Ok(messages
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, message)| message.clone())
            .collect()),

        Transition::ResetMessages => Ok(Vec::new()),

        Transition::UpdateMessage { index, content } => {
            update_at(messages, index, |message| message.content = content)
        }

        Transition::UpdateMessageRole { index, role } => {
            update_at(messages, index, |message| message.role = role)
        }

        Transition::AddUserMessage { content } => Ok(appended(messages, Message::user(content))),

        Transition::UpdateLatestBotMessage { chunks } => {
            Ok(handle_update_latest_bot_message(messages, &chunks))
        }

        Transition::SetErrorMessage { index, error } => handle_set_error(messages, index, error),

        Transition::UpdateMessageChoice { index, content } => {
            update_at(messages, index, |message| {
                let previous = std::mem::replace(&mut message.content, content);
                message.choices.get_or_insert_with(Vec::new).push(previous);
            })
        }
    }
}

fn appended(messages: &[Message], message: Message) -> Vec<Message> {
    let mut next = Vec::with_capacity(messages.len() + 1);
    next.extend_from_slice(messages);
    next.push(message);
    next
}

fn handle_insert_message(messages: &[Message], message: Message, index: usize) -> Vec<Message> {
    // Positions past the end append, like inserting at `len`.
    let position = if index > messages.len() {
        debug!(
            target: "colloquy::store",
            index,
            len = messages.len(),
            "Insert position past end, appending"
        );
        messages.len()
    } else {
        index
    };

    let mut next = messages.to_vec();
    next.insert(position, message);
    next
}

fn handle_update_latest_bot_message(messages: &[Message], chunks: &[String]) -> Vec<Message> {
    let reply = Message::new(Role::Assistant, chunks.concat());
    let kept = messages.len().saturating_sub(1);

    let mut next = Vec::with_capacity(kept + 1);
    next.extend_from_slice(&messages[..kept]);
    next.push(reply);
    next
}

fn handle_set_error(
    messages: &[Message],
    index: usize,
    error: Option<MessageError>,
) -> Result<Vec<Message>> {
    update_at(messages, index, |message| message.error = error)
}

/// Copy the sequence and edit the message at `index` in the copy.
fn update_at<F>(messages: &[Message], index: usize, edit: F) -> Result<Vec<Message>>
where
    F: FnOnce(&mut Message),
{
    let mut next = messages.to_vec();
    let len = next.len();
    let message = next
        .get_mut(index)
        .ok_or(Error::IndexOutOfRange { index, len })?;
    edit(message);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ErrorKind;
    use rstest::rstest;

    fn conversation() -> Vec<Message> {
        vec![
            Message::user("Hi"),
            Message::assistant("Hello"),
            Message::user("How are you?"),
        ]
    }

    #[test]
    fn test_add_message_appends() {
        let before = conversation();
        let after = apply(
            &before,
            Transition::AddMessage {
                message: Message::assistant("Fine"),
            },
        )
        .unwrap();

        assert_eq!(after.len(), 4);
        assert_eq!(after[3], Message::assistant("Fine"));
        assert_eq!(before.len(), 3, "input must not be mutated");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(10, 3)]
    fn test_insert_message_positions(#[case] index: usize, #[case] expected_position: usize) {
        let after = apply(
            &conversation(),
            Transition::InsertMessage {
                message: Message::system("Be brief"),
                index,
            },
        )
        .unwrap();

        assert_eq!(after.len(), 4);
        assert_eq!(after[expected_position], Message::system("Be brief"));
    }

    #[test]
    fn test_insert_shifts_following_messages() {
        let after = apply(
            &conversation(),
            Transition::InsertMessage {
                message: Message::system("Be brief"),
                index: 1,
            },
        )
        .unwrap();

        let contents: Vec<_> = after.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["Hi", "Be brief", "Hello", "How are you?"]);
    }

    #[test]
    fn test_delete_message_out_of_range_is_noop() {
        let before = conversation();
        let after = apply(&before, Transition::DeleteMessage { index: 7 }).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_reset_messages_empties() {
        let after = apply(&conversation(), Transition::ResetMessages).unwrap();
        assert!(after.is_empty());
    }

    #[test]
    fn test_update_message_keeps_other_fields() {
        let mut before = conversation();
        before[1].choices = Some(vec!["Hey".to_string()]);
        before[1].error = Some(MessageError::new(ErrorKind::Provider, 500, "down"));

        let after = apply(
            &before,
            Transition::UpdateMessage {
                index: 1,
                content: "Hello there".to_string(),
            },
        )
        .unwrap();

        assert_eq!(after[1].content, "Hello there");
        assert_eq!(after[1].role, Role::Assistant);
        assert_eq!(after[1].choices, before[1].choices);
        assert_eq!(after[1].error, before[1].error);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[rstest]
    #[case(Transition::UpdateMessage { index: 3, content: "x".to_string() })]
    #[case(Transition::UpdateMessageRole { index: 3, role: Role::User })]
    #[case(Transition::SetErrorMessage { index: 3, error: None })]
    #[case(Transition::UpdateMessageChoice { index: 3, content: "x".to_string() })]
    fn test_indexed_edits_reject_out_of_range(#[case] transition: Transition) {
        let err = apply(&conversation(), transition).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange { index: 3, len: 3 }
        ));
    }

    #[test]
    fn test_update_message_role() {
        let after = apply(
            &conversation(),
            Transition::UpdateMessageRole {
                index: 0,
                role: Role::Assistant,
            },
        )
        .unwrap();
        assert_eq!(after[0].role, Role::Assistant);
        assert_eq!(after[0].content, "Hi");
    }

    #[test]
    fn test_add_user_message() {
        let after = apply(
            &[],
            Transition::AddUserMessage {
                content: "Hi".to_string(),
            },
        )
        .unwrap();
        assert_eq!(after, vec![Message::user("Hi")]);
    }

    #[test]
    fn test_update_latest_bot_message_replaces_last() {
        let mut before = conversation();
        before[2].choices = Some(vec!["old".to_string()]);
        before[2].error = Some(MessageError::new(ErrorKind::App, 400, "bad"));

        let after = apply(
            &before,
            Transition::UpdateLatestBotMessage {
                chunks: vec!["Hel".to_string(), "lo".to_string()],
            },
        )
        .unwrap();

        assert_eq!(after.len(), 3);
        assert_eq!(after[2], Message::assistant("Hello"));
        assert_eq!(after[..2], before[..2]);
    }

    #[test]
    fn test_update_latest_bot_message_on_empty_appends() {
        let after = apply(
            &[],
            Transition::UpdateLatestBotMessage {
                chunks: vec!["Hi".to_string()],
            },
        )
        .unwrap();
        assert_eq!(after, vec![Message::assistant("Hi")]);
    }

    #[test]
    fn test_set_error_message_replaces_and_clears() {
        let first = MessageError::new(ErrorKind::Provider, 429, "rate limited");
        let second = MessageError::new(ErrorKind::App, 500, "crashed");

        let with_first = apply(
            &conversation(),
            Transition::SetErrorMessage {
                index: 1,
                error: Some(first),
            },
        )
        .unwrap();
        let with_second = apply(
            &with_first,
            Transition::SetErrorMessage {
                index: 1,
                error: Some(second.clone()),
            },
        )
        .unwrap();
        assert_eq!(with_second[1].error, Some(second));

        let cleared = apply(
            &with_second,
            Transition::SetErrorMessage {
                index: 1,
                error: None,
            },
        )
        .unwrap();
        assert_eq!(cleared[1].error, None);
        assert_eq!(cleared[1].content, "Hello");
    }

    #[test]
    fn test_update_message_choice_keeps_history() {
        let first = apply(
            &conversation(),
            Transition::UpdateMessageChoice {
                index: 1,
                content: "v1".to_string(),
            },
        )
        .unwrap();
        let second = apply(
            &first,
            Transition::UpdateMessageChoice {
                index: 1,
                content: "v2".to_string(),
            },
        )
        .unwrap();

        assert_eq!(first[1].choices, Some(vec!["Hello".to_string()]));
        assert_eq!(second[1].content, "v2");
        assert_eq!(
            second[1].choices,
            Some(vec!["Hello".to_string(), "v1".to_string()])
        );
    }
}
