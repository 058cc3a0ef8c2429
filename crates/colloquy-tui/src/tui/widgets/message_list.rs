//! MessageListWidget - renders the rows of a [`MessageListView`]
//!
//! Each message is a bordered block: role badge on the left of the top
//! border, delete marker on the right, content (or the role's placeholder)
//! inside, followed by the error and choices annotations when present. The
//! list ends with an append row.

use colloquy_core::{Message, Role};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::{Component, Theme};
use crate::tui::view::{MessageListView, MessageRow, RowField};

pub const ADD_ITEM_LABEL: &str = "+ Add item";
pub const DELETE_LABEL: &str = "[x]";

pub struct MessageListWidget<'a> {
    view: &'a MessageListView,
    theme: &'a Theme,
}

impl<'a> MessageListWidget<'a> {
    pub fn new(view: &'a MessageListView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn role_style(&self, role: Role) -> Style {
        if self.view.is_disabled() {
            return self.theme.style(Component::DisabledText);
        }
        match role {
            Role::User => self.theme.style(Component::RoleUser),
            Role::Assistant => self.theme.style(Component::RoleAssistant),
            Role::System => self.theme.style(Component::RoleSystem),
        }
    }

    fn field_focused(&self, index: usize, field: RowField) -> bool {
        !self.view.is_disabled() && self.view.selected() == index && self.view.field() == field
    }

    fn editing_index(&self) -> Option<usize> {
        self.view.editor().map(|editor| editor.index)
    }

    /// Content lines for a row that is not being edited
    fn content_lines(&self, row: &MessageRow<'_>, width: u16) -> Vec<Line<'static>> {
        if row.message.content.is_empty() {
            return vec![Line::from(Span::styled(
                row.placeholder.to_string(),
                self.theme.style(Component::Placeholder),
            ))];
        }

        let mut style = if self.view.is_disabled() {
            self.theme.style(Component::DisabledText)
        } else {
            self.theme.style(Component::Content)
        };
        if self.field_focused(row.index, RowField::Content) {
            style = style.patch(self.theme.style(Component::FocusedField));
        }

        row.message
            .content
            .split('\n')
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(line, usize::from(width.max(1)))
                        .into_iter()
                        .map(|part| part.into_owned())
                        .collect()
                }
            })
            .map(|text| Line::from(Span::styled(text, style)))
            .collect()
    }

    fn annotation_lines(&self, message: &Message) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(error) = &message.error {
            lines.push(Line::from(Span::styled(
                format!("⚠ {} {}: {}", error.kind, error.status, error.message),
                self.theme.style(Component::ErrorText),
            )));
        }
        let choices = message.choice_count();
        if choices > 0 {
            let noun = if choices == 1 { "version" } else { "versions" };
            lines.push(Line::from(Span::styled(
                format!("{choices} earlier {noun}"),
                self.theme.style(Component::ChoicesText),
            )));
        }
        lines
    }

    fn content_height(&self, row: &MessageRow<'_>, width: u16) -> usize {
        match self.view.editor() {
            Some(editor) if editor.index == row.index => editor.textarea.lines().len().max(1),
            _ => self.content_lines(row, width).len(),
        }
    }

    /// Height of a message row including its borders
    fn row_height(&self, row: &MessageRow<'_>, width: u16) -> u16 {
        let inner = self.content_height(row, width) + self.annotation_lines(row.message).len();
        u16::try_from(inner + 2).unwrap_or(u16::MAX)
    }

    fn render_row(&self, row: &MessageRow<'_>, area: Rect, buf: &mut Buffer) {
        let focused_row = self.view.selected() == row.index;
        let border_style = if focused_row && !self.view.is_disabled() {
            self.theme.style(Component::RowBorderFocused)
        } else {
            self.theme.style(Component::RowBorder)
        };

        let mut role_style = self.role_style(row.role);
        if self.field_focused(row.index, RowField::Role) {
            role_style = role_style.patch(self.theme.style(Component::FocusedField));
        }
        let mut delete_style = if self.view.is_disabled() {
            self.theme.style(Component::DisabledText)
        } else {
            self.theme.style(Component::DeleteAction)
        };
        if self.field_focused(row.index, RowField::Delete) {
            delete_style = delete_style.patch(self.theme.style(Component::FocusedField));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {} ", row.role_label),
                role_style,
            )))
            .title(Line::from(Span::styled(DELETE_LABEL, delete_style)).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width;
        let content_height = u16::try_from(self.content_height(row, width))
            .unwrap_or(u16::MAX)
            .min(inner.height);
        let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);

        match self.view.editor() {
            Some(editor) if editor.index == row.index => {
                Widget::render(&editor.textarea, content_area, buf);
            }
            _ => {
                Paragraph::new(self.content_lines(row, width)).render(content_area, buf);
            }
        }

        let annotations = self.annotation_lines(row.message);
        if !annotations.is_empty() {
            let annotation_area = Rect::new(
                inner.x,
                inner.y + content_height,
                inner.width,
                inner.height.saturating_sub(content_height),
            );
            Paragraph::new(annotations).render(annotation_area, buf);
        }
    }

    fn render_add_row(&self, area: Rect, buf: &mut Buffer) {
        let mut style = if self.view.is_disabled() {
            self.theme.style(Component::DisabledText)
        } else {
            self.theme.style(Component::AddButton)
        };
        if !self.view.is_disabled() && self.view.selected() == self.view.messages().len() {
            style = style.patch(self.theme.style(Component::FocusedField));
        }
        Paragraph::new(Line::from(Span::styled(ADD_ITEM_LABEL, style)).centered())
            .render(area, buf);
    }
}

/// First row to draw so that the selected row ends inside the viewport.
fn first_visible(heights: &[u16], selected: usize, viewport: u16) -> usize {
    let Some(last) = heights.len().checked_sub(1) else {
        return 0;
    };
    let selected = selected.min(last);
    let mut total: u32 = heights
        .iter()
        .take(selected + 1)
        .map(|h| u32::from(*h))
        .sum();
    let mut start = 0;
    while total > u32::from(viewport) && start < selected {
        total -= u32::from(heights[start]);
        start += 1;
    }
    start
}

impl Widget for MessageListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.view.is_visible() || area.height == 0 || area.width < 4 {
            return;
        }

        let inner_width = area.width.saturating_sub(2);
        let rows = self.view.rows();
        let mut heights: Vec<u16> = rows
            .iter()
            .map(|row| self.row_height(row, inner_width))
            .collect();
        heights.push(1);

        // Keep the row being edited in view even if the cursor moved elsewhere
        let anchor = self.editing_index().unwrap_or(self.view.selected());
        let start = first_visible(&heights, anchor, area.height);

        let mut y = area.y;
        for (index, height) in heights.iter().enumerate().skip(start) {
            if y >= area.bottom() {
                break;
            }
            let height = (*height).min(area.bottom() - y);
            let row_area = Rect::new(area.x, y, area.width, height);
            match rows.get(index) {
                Some(row) => self.render_row(row, row_area, buf),
                None => self.render_add_row(row_area, buf),
            }
            y += height;
        }
    }
}
