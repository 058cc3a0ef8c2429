use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input;

use crate::error::Result;
use crate::tui::view::{MessageListView, RowAction, RowField};

impl MessageListView {
    /// Handle a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if is_interrupt(&key) {
            return Ok(true);
        }
        if self.editor.is_some() {
            return self.handle_editing_key(key);
        }
        if !self.is_visible() {
            return Ok(matches!(key.code, KeyCode::Char('q')));
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),

            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }

            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(self.messages().len());
            }

            KeyCode::BackTab => {
                self.field = self.field.previous();
            }

            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.field = self.field.previous();
            }

            KeyCode::Tab => {
                self.field = self.field.next();
            }

            KeyCode::Enter => {
                self.activate_selection()?;
            }

            KeyCode::Char('i') => {
                if let Some(index) = self.selected_message() {
                    self.start_editing(index);
                }
            }

            KeyCode::Char('x') => {
                if let Some(index) = self.selected_message() {
                    self.handle(RowAction::Delete { index })?;
                }
            }

            KeyCode::Char('a') => {
                self.handle(RowAction::Append)?;
            }

            _ => {}
        }

        Ok(false)
    }

    /// Insert pasted text into the open editor.
    pub fn handle_paste(&mut self, text: &str) -> Result<()> {
        let Some(editor) = self.editor.as_mut() else {
            return Ok(());
        };
        editor.textarea.insert_str(text);
        self.sync_editor()
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Enter
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT)
                    || key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                if let Some(editor) = self.editor.as_mut() {
                    editor.textarea.insert_newline();
                }
                self.sync_editor()?;
            }

            KeyCode::Esc | KeyCode::Enter => {
                self.stop_editing();
            }

            _ => {
                let modified = self
                    .editor
                    .as_mut()
                    .is_some_and(|editor| editor.textarea.input(Input::from(key)));
                if modified {
                    self.sync_editor()?;
                }
            }
        }
        Ok(false)
    }

    /// Push the editor's text into the store, one transition per change.
    fn sync_editor(&mut self) -> Result<()> {
        let Some(editor) = self.editor.as_ref() else {
            return Ok(());
        };
        let index = editor.index;
        let content = editor.content();
        if self.messages().get(index).map(|m| m.content.as_str()) == Some(content.as_str()) {
            return Ok(());
        }
        self.handle(RowAction::EditContent { index, content })?;
        Ok(())
    }

    fn activate_selection(&mut self) -> Result<()> {
        let Some(index) = self.selected_message() else {
            self.handle(RowAction::Append)?;
            return Ok(());
        };

        match self.field {
            RowField::Role => {
                let role = self.messages()[index].role.alternate();
                self.handle(RowAction::SetRole { index, role })?;
            }
            RowField::Content => {
                self.start_editing(index);
            }
            RowField::Delete => {
                self.handle(RowAction::Delete { index })?;
            }
        }
        Ok(())
    }

    /// Index of the selected message, `None` on the append row
    fn selected_message(&self) -> Option<usize> {
        (self.selected < self.messages().len()).then_some(self.selected)
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::{Message, Role};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(view: &mut MessageListView, text: &str) {
        for c in text.chars() {
            view.handle_key(press(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_edit_content_by_typing() {
        let mut view = MessageListView::new(Some(vec![Message::user("Hi")]));

        view.handle_key(press(KeyCode::Enter)).unwrap();
        assert!(view.is_editing());
        type_text(&mut view, " there");
        view.handle_key(press(KeyCode::Esc)).unwrap();

        assert!(!view.is_editing());
        assert_eq!(view.messages()[0].content, "Hi there");
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut view = MessageListView::new(Some(vec![Message::user("a")]));
        view.handle_key(press(KeyCode::Char('i'))).unwrap();
        view.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT))
            .unwrap();
        type_text(&mut view, "b");

        assert_eq!(view.messages()[0].content, "a\nb");
    }

    #[test]
    fn test_role_toggle_via_enter() {
        let mut view = MessageListView::new(Some(vec![Message::user("Hi")]));
        view.handle_key(press(KeyCode::BackTab)).unwrap();
        assert_eq!(view.field(), RowField::Role);

        view.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(view.messages()[0].role, Role::Assistant);
        view.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(view.messages()[0].role, Role::User);
    }

    #[test]
    fn test_enter_on_append_row_appends() {
        let mut view = MessageListView::new(Some(vec![Message::user("Hi")]));
        view.handle_key(press(KeyCode::Down)).unwrap();
        assert_eq!(view.selected(), 1);

        view.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(view.messages()[1], Message::assistant(""));
    }

    #[test]
    fn test_delete_shortcut() {
        let mut view = MessageListView::new(Some(vec![
            Message::user("Hi"),
            Message::assistant("Hello"),
        ]));
        view.handle_key(press(KeyCode::Char('x'))).unwrap();
        assert_eq!(view.messages(), &[Message::assistant("Hello")]);
    }

    #[test]
    fn test_disabled_ignores_editing_keys() {
        let mut view =
            MessageListView::new(Some(vec![Message::user("Hi")])).with_disabled(true);

        for code in [
            KeyCode::Enter,
            KeyCode::Char('i'),
            KeyCode::Char('x'),
            KeyCode::Char('a'),
        ] {
            assert!(!view.handle_key(press(code)).unwrap());
        }
        assert!(!view.is_editing());
        assert_eq!(view.messages(), &[Message::user("Hi")]);

        view.handle_key(press(KeyCode::Down)).unwrap();
        assert_eq!(view.selected(), 1, "navigation still works");
    }

    #[test]
    fn test_quit_keys() {
        let mut view = MessageListView::new(Some(vec![]));
        assert!(view.handle_key(press(KeyCode::Char('q'))).unwrap());
        assert!(
            view.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap()
        );
    }

    #[test]
    fn test_q_while_editing_is_text() {
        let mut view = MessageListView::new(Some(vec![Message::user("")]));
        view.handle_key(press(KeyCode::Char('i'))).unwrap();
        assert!(!view.handle_key(press(KeyCode::Char('q'))).unwrap());
        assert_eq!(view.messages()[0].content, "q");
    }

    #[test]
    fn test_paste_into_editor() {
        let mut view = MessageListView::new(Some(vec![Message::assistant("")]));
        view.handle_key(press(KeyCode::Char('i'))).unwrap();
        view.handle_paste("line one\nline two").unwrap();
        assert_eq!(view.messages()[0].content, "line one\nline two");
    }
}
