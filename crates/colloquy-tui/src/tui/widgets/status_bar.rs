use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::tui::theme::{Component, Theme};
use crate::tui::view::MessageListView;

const BROWSE_HINTS: &str = "↑↓ select  Tab field  Enter activate  a add  x delete  q quit";
const DISABLED_HINTS: &str = "↑↓ select  q quit";
const EDITING_HINTS: &str = "Esc/Enter done  Shift+Enter newline";

/// One-line footer with key hints and state badges
pub struct StatusBar<'a> {
    view: &'a MessageListView,
    theme: &'a Theme,
    notice: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(view: &'a MessageListView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            notice: None,
        }
    }

    /// Show `notice` in place of the key hints.
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    fn hints(&self) -> &'static str {
        if self.view.is_editing() {
            EDITING_HINTS
        } else if self.view.is_disabled() {
            DISABLED_HINTS
        } else {
            BROWSE_HINTS
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        if self.view.is_disabled() {
            spans.push(Span::styled(
                " disabled ",
                self.theme.style(Component::StatusDisabled),
            ));
            spans.push(Span::raw(" "));
        }
        if self.view.is_modified() {
            spans.push(Span::styled(
                " modified ",
                self.theme.style(Component::StatusModified),
            ));
            spans.push(Span::raw(" "));
        }
        match self.notice {
            Some(notice) => spans.push(Span::styled(
                notice.to_string(),
                self.theme.style(Component::ErrorText),
            )),
            None => spans.push(Span::styled(
                self.hints(),
                self.theme.style(Component::StatusBar),
            )),
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::{Message, Transition};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(view: &MessageListView) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| f.render_widget(StatusBar::new(view, &theme), f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_badges_follow_state() {
        let mut view = MessageListView::new(Some(vec![Message::user("Hi")]));
        let line = render(&view);
        assert!(!line.contains("modified"));
        assert!(line.contains("a add"));

        view.dispatch(Transition::DeleteMessage { index: 0 }).unwrap();
        view.set_disabled(true);
        let line = render(&view);
        assert!(line.contains("disabled"));
        assert!(line.contains("modified"));
        assert!(!line.contains("a add"));
    }
}
