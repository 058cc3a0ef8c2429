#[cfg(test)]
mod tests {
    use crate::messages::{ErrorKind, Message, MessageError, Role};
    use crate::store::state::MessageStore;
    use crate::store::transition::Transition;

    #[test]
    fn test_add_update_delete_walkthrough() {
        let mut store = MessageStore::new(vec![Message::user("Hi")]);

        store
            .dispatch(Transition::AddMessage {
                message: Message::assistant(""),
            })
            .unwrap();
        assert_eq!(
            store.messages(),
            &[Message::user("Hi"), Message::assistant("")]
        );

        store
            .dispatch(Transition::UpdateMessage {
                index: 1,
                content: "Hello there".to_string(),
            })
            .unwrap();
        assert_eq!(
            store.messages(),
            &[Message::user("Hi"), Message::assistant("Hello there")]
        );

        store
            .dispatch(Transition::DeleteMessage { index: 0 })
            .unwrap();
        assert_eq!(store.messages(), &[Message::assistant("Hello there")]);
    }

    #[test]
    fn test_failed_reply_then_regenerate() {
        let mut store = MessageStore::default();
        store
            .dispatch(Transition::AddUserMessage {
                content: "Translate 'cat'".to_string(),
            })
            .unwrap();
        store
            .dispatch(Transition::AddMessage {
                message: Message::assistant(""),
            })
            .unwrap();
        store
            .dispatch(Transition::SetErrorMessage {
                index: 1,
                error: Some(MessageError::new(ErrorKind::Provider, 503, "overloaded")),
            })
            .unwrap();
        assert!(store.messages()[1].error.is_some());

        store
            .dispatch(Transition::UpdateLatestBotMessage {
                chunks: vec!["chat".to_string()],
            })
            .unwrap();
        store
            .dispatch(Transition::UpdateMessageChoice {
                index: 1,
                content: "le chat".to_string(),
            })
            .unwrap();

        let reply = &store.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "le chat");
        assert_eq!(reply.choices, Some(vec!["chat".to_string()]));
        assert_eq!(reply.error, None, "streaming replaced the errored slot");
    }

    #[test]
    fn test_replay_from_log_matches_dispatch() {
        let log = r#"
{"type": "addUserMessage", "message": "Hi"}
{"type": "addMessage", "message": {"role": "assistant", "content": ""}}
{"type": "updateLatestBotMessage", "responseStream": ["Hel", "lo"]}
{"type": "insertMessage", "index": 0, "message": {"role": "system", "content": "Be kind"}}
{"type": "updateMessageRole", "index": 1, "role": "assistant"}
"#;
        let transitions = Transition::parse_log(log).unwrap();
        let store = MessageStore::replay(vec![], transitions).unwrap();

        assert_eq!(
            store.messages(),
            &[
                Message::system("Be kind"),
                Message::assistant("Hi"),
                Message::assistant("Hello"),
            ]
        );
        assert_eq!(store.revision(), 5);
    }

    #[test]
    fn test_reset_then_rebuild() {
        let mut store =
            MessageStore::new(vec![Message::user("a"), Message::assistant("b")]);
        store.dispatch(Transition::ResetMessages).unwrap();
        assert!(store.is_empty());

        store
            .dispatch(Transition::InsertMessage {
                message: Message::user("fresh"),
                index: 0,
            })
            .unwrap();
        assert_eq!(store.messages(), &[Message::user("fresh")]);
    }
}
