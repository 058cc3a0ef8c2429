//! MessageListView - editable list of example messages
//!
//! The view owns the live sequence through a [`MessageStore`]. Every change
//! goes through [`MessageListView::dispatch`], which applies the transition and
//! then compares the result against the snapshot the owner supplied at
//! construction. When they differ the owner's change callback receives the
//! full new sequence.

use colloquy_core::preferences::EditorPreferences;
use colloquy_core::{Message, MessageStore, Role, Transition};
use tracing::{debug, error};
use tui_textarea::TextArea;

use crate::error::Result;

/// Callback receiving the full sequence whenever it differs from the original
pub type ChangeCallback = Box<dyn FnMut(&[Message]) + Send>;

/// A user-interface action on the list, before it becomes a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    SetRole { index: usize, role: Role },
    EditContent { index: usize, content: String },
    Delete { index: usize },
    Append,
}

/// Field of a row that holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowField {
    Role,
    #[default]
    Content,
    Delete,
}

impl RowField {
    pub fn next(self) -> Self {
        match self {
            RowField::Role => RowField::Content,
            RowField::Content => RowField::Delete,
            RowField::Delete => RowField::Role,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            RowField::Role => RowField::Delete,
            RowField::Content => RowField::Role,
            RowField::Delete => RowField::Content,
        }
    }
}

/// Render data for one message row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow<'a> {
    pub index: usize,
    /// Position plus content; changes whenever either does
    pub key: String,
    pub role: Role,
    pub role_label: &'a str,
    pub placeholder: &'a str,
    pub message: &'a Message,
}

/// Content editor bound to one row
#[derive(Debug)]
pub struct ContentEditor {
    pub index: usize,
    pub textarea: TextArea<'static>,
}

impl ContentEditor {
    fn new(index: usize, content: &str, placeholder: &str) -> Self {
        let mut textarea = TextArea::new(content.split('\n').map(str::to_string).collect());
        textarea.set_placeholder_text(placeholder.to_string());
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        Self { index, textarea }
    }

    pub fn content(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

pub struct MessageListView {
    store: MessageStore,
    /// Owner snapshot taken at construction; the reference for change detection
    original: Vec<Message>,
    /// False when the owner supplied no data; nothing is rendered then
    has_source: bool,
    on_change: Option<ChangeCallback>,
    disabled: bool,
    labels: EditorPreferences,
    /// Selected row; `len()` selects the append row
    pub(crate) selected: usize,
    pub(crate) field: RowField,
    pub(crate) editor: Option<ContentEditor>,
}

impl std::fmt::Debug for MessageListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageListView")
            .field("messages", &self.store.messages())
            .field("has_source", &self.has_source)
            .field("disabled", &self.disabled)
            .field("selected", &self.selected)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl MessageListView {
    /// Seed the view from the owner's data. Later changes on the owner side
    /// are never observed.
    pub fn new(data_sources: Option<Vec<Message>>) -> Self {
        let has_source = data_sources.is_some();
        let original = data_sources.unwrap_or_default();
        Self {
            store: MessageStore::new(original.clone()),
            original,
            has_source,
            on_change: None,
            disabled: false,
            labels: EditorPreferences::default(),
            selected: 0,
            field: RowField::default(),
            editor: None,
        }
    }

    pub fn with_on_change<F>(mut self, on_change: F) -> Self
    where
        F: FnMut(&[Message]) + Send + 'static,
    {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn with_labels(mut self, labels: EditorPreferences) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Disabling closes any open editor; stored data is untouched.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.editor = None;
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_visible(&self) -> bool {
        self.has_source
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// Whether the live sequence differs from the owner's snapshot
    pub fn is_modified(&self) -> bool {
        self.store.messages() != self.original.as_slice()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn field(&self) -> RowField {
        self.field
    }

    pub fn editor(&self) -> Option<&ContentEditor> {
        self.editor.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// One entry per message, in sequence order
    pub fn rows(&self) -> Vec<MessageRow<'_>> {
        self.store
            .messages()
            .iter()
            .enumerate()
            .map(|(index, message)| MessageRow {
                index,
                key: format!("{index}-{}", message.content),
                role: message.role,
                role_label: self.labels.role_label(message.role),
                placeholder: self.labels.placeholder(message.role),
                message,
            })
            .collect()
    }

    /// Role for the next appended row: the opposite of the last message's
    /// role, `assistant` for an empty list.
    pub fn append_role(&self) -> Role {
        self.store
            .last()
            .map_or(Role::Assistant, |last| last.role.alternate())
    }

    /// Apply a transition, then tell the owner if the result differs from
    /// the original snapshot. Not gated by `disabled`.
    pub fn dispatch(&mut self, transition: Transition) -> Result<()> {
        let kind = transition.kind();
        let editor_index = self.editor_index_after(&transition);
        if let Err(e) = self.store.dispatch(transition) {
            error!(target: "colloquy::view", kind, error = %e, "Dispatch failed");
            return Err(e.into());
        }
        match editor_index {
            Some(index) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.index = index;
                }
            }
            None => self.editor = None,
        }
        self.clamp_selection();

        if self.is_modified() {
            debug!(
                target: "colloquy::view",
                kind,
                len = self.store.len(),
                "Sequence differs from original, notifying owner"
            );
            if let Some(on_change) = self.on_change.as_mut() {
                on_change(self.store.messages());
            }
        }
        Ok(())
    }

    /// Translate a UI action into a transition. Returns `false` when the
    /// action was suppressed because the view is disabled.
    pub fn handle(&mut self, action: RowAction) -> Result<bool> {
        if self.disabled {
            debug!(target: "colloquy::view", ?action, "Ignoring action while disabled");
            return Ok(false);
        }

        let transition = match action {
            RowAction::SetRole { index, role } => Transition::UpdateMessageRole { index, role },
            RowAction::EditContent { index, content } => {
                Transition::UpdateMessage { index, content }
            }
            RowAction::Delete { index } => {
                if self.editor.as_ref().is_some_and(|e| e.index == index) {
                    self.editor = None;
                }
                Transition::DeleteMessage { index }
            }
            RowAction::Append => Transition::AddMessage {
                message: Message::new(self.append_role(), ""),
            },
        };
        let appended = matches!(transition, Transition::AddMessage { .. });

        self.dispatch(transition)?;

        if appended {
            self.selected = self.store.len().saturating_sub(1);
            self.field = RowField::Content;
        }
        Ok(true)
    }

    /// Open the content editor on `index`.
    pub fn start_editing(&mut self, index: usize) -> bool {
        if self.disabled {
            return false;
        }
        let Some(message) = self.store.get(index) else {
            return false;
        };
        let placeholder = self.labels.placeholder(message.role).to_string();
        self.editor = Some(ContentEditor::new(index, &message.content, &placeholder));
        self.selected = index;
        self.field = RowField::Content;
        true
    }

    pub fn stop_editing(&mut self) {
        self.editor = None;
    }

    /// Where the open editor's message sits once `transition` is applied;
    /// `None` when it is gone or was rewritten underneath the editor.
    fn editor_index_after(&self, transition: &Transition) -> Option<usize> {
        let index = self.editor.as_ref()?.index;
        let len = self.store.len();
        match transition {
            Transition::DeleteMessage { index: deleted } if *deleted < len => {
                match index.cmp(deleted) {
                    std::cmp::Ordering::Less => Some(index),
                    std::cmp::Ordering::Equal => None,
                    std::cmp::Ordering::Greater => Some(index - 1),
                }
            }
            Transition::InsertMessage { index: at, .. } if *at <= index => Some(index + 1),
            Transition::ResetMessages => None,
            Transition::UpdateLatestBotMessage { .. } if index + 1 >= len => None,
            _ => Some(index),
        }
    }

    fn clamp_selection(&mut self) {
        // The append row sits at `len`
        self.selected = self.selected.min(self.store.len());
        if let Some(editor) = &self.editor {
            if editor.index >= self.store.len() {
                self.editor = None;
            }
        }
    }
}
