//! Terminal editor for an example conversation.

use std::io::{self, Stdout, Write};

use colloquy_core::Message;
use colloquy_core::preferences::EditorPreferences;
use futures::StreamExt;
use ratatui::crossterm::event::{Event, EventStream, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info};

use crate::error::{Error, Result};

pub mod handlers;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod widgets;

pub use theme::Theme;
pub use view::{MessageListView, RowAction, RowField};

use widgets::{MessageListWidget, StatusBar};

/// Everything the editor needs from its owner
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Initial sequence; `None` runs the editor with nothing rendered
    pub messages: Option<Vec<Message>>,
    pub disabled: bool,
    pub theme: Theme,
    pub labels: EditorPreferences,
    pub title: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            messages: Some(Vec::new()),
            disabled: false,
            theme: Theme::default(),
            labels: EditorPreferences::default(),
            title: "Colloquy".to_string(),
        }
    }
}

/// State of the list when the editor closed
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOutcome {
    pub messages: Vec<Message>,
    /// Whether `messages` differs from the sequence the editor opened with
    pub modified: bool,
}

impl From<&MessageListView> for EditorOutcome {
    fn from(view: &MessageListView) -> Self {
        Self {
            messages: view.messages().to_vec(),
            modified: view.is_modified(),
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: MessageListView,
    theme: Theme,
    /// Last failed dispatch, shown in the status bar until the next key
    notice: Option<String>,
}

impl Tui {
    pub fn new<F>(options: EditorOptions, on_change: F) -> Result<Self>
    where
        F: FnMut(&[Message]) + Send + 'static,
    {
        let mut guard = terminal::SetupGuard::new();
        let mut stdout = io::stdout();
        terminal::setup(&mut stdout, &options.title)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        guard.disarm();

        let view = MessageListView::new(options.messages)
            .with_labels(options.labels)
            .with_disabled(options.disabled)
            .with_on_change(on_change);

        Ok(Self {
            terminal,
            view,
            theme: options.theme,
            notice: None,
        })
    }

    pub fn view(&self) -> &MessageListView {
        &self.view
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            target: "colloquy::tui",
            messages = self.view.messages().len(),
            disabled = self.view.is_disabled(),
            "Starting editor"
        );

        let mut events = EventStream::new();
        self.draw()?;

        loop {
            let Some(event) = events.next().await else {
                return Err(Error::InvalidState(
                    "terminal event stream closed".to_string(),
                ));
            };

            match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.notice = None;
                    match self.view.handle_key(key) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => {
                            error!(target: "colloquy::tui", "Key handling failed: {e}");
                            self.notice = Some(e.to_string());
                        }
                    }
                }
                Event::Paste(data) => {
                    let normalized = data.replace("\r\n", "\n").replace('\r', "\n");
                    debug!(target: "colloquy::tui", "Pasted {} chars", normalized.len());
                    if let Err(e) = self.view.handle_paste(&normalized) {
                        error!(target: "colloquy::tui", "Paste failed: {e}");
                        self.notice = Some(e.to_string());
                    }
                }
                Event::Resize(..) => {}
                _ => continue,
            }

            self.draw()?;
        }

        info!(
            target: "colloquy::tui",
            modified = self.view.is_modified(),
            "Editor closed"
        );
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let view = &self.view;
        let theme = &self.theme;
        let notice = self.notice.as_deref();
        self.terminal
            .draw(|frame| render(frame, view, theme, notice))
            .map_err(|e| Error::Rendering(e.to_string()))?;
        Ok(())
    }

    pub fn cleanup_terminal(&mut self) -> Result<()> {
        terminal::cleanup_with_writer(self.terminal.backend_mut());
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        terminal::cleanup_with_writer(self.terminal.backend_mut());
    }
}

fn render(frame: &mut Frame<'_>, view: &MessageListView, theme: &Theme, notice: Option<&str>) {
    let area = frame.area();
    if let Some(bg) = theme.get_background_color() {
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(MessageListWidget::new(view, theme), chunks[0]);
    frame.render_widget(StatusBar::new(view, theme).notice(notice), chunks[1]);
}

/// Free function for best-effort terminal cleanup
pub fn cleanup_terminal() {
    terminal::cleanup();
}

/// Restore the terminal before the default panic output is printed.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        let mut stderr = io::stderr();
        let _ = writeln!(stderr, "Application panicked:");
        let _ = writeln!(stderr, "{panic_info}");
    }));
}

/// Run the editor until the user quits. `on_change` receives every sequence
/// that differs from `options.messages`; the returned outcome holds the
/// final sequence.
pub async fn run_editor<F>(options: EditorOptions, on_change: F) -> Result<EditorOutcome>
where
    F: FnMut(&[Message]) + Send + 'static,
{
    let mut tui = Tui::new(options, on_change)?;
    let result = tui.run().await;
    if let Err(e) = tui.cleanup_terminal() {
        error!(target: "colloquy::tui", "Failed to restore terminal: {e}");
    }
    result.map(|()| EditorOutcome::from(tui.view()))
}
