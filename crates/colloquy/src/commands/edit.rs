use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::Command;
use colloquy_core::Message;
use colloquy_core::messages::{load_messages, save_messages};
use colloquy_core::preferences::Preferences;
use colloquy_tui::tui::Theme;
use colloquy_tui::{EditorOptions, EditorOutcome, run_editor, setup_panic_hook};

pub struct EditCommand {
    pub file: PathBuf,
    pub disabled: bool,
    pub theme: Option<String>,
    pub preferences: Preferences,
}

impl EditCommand {
    /// Flag first, then preferences, then the built-in default.
    fn resolve_theme(&self) -> Result<Theme> {
        match self.theme.as_ref().or(self.preferences.ui.theme.as_ref()) {
            Some(name) => Theme::by_name(name).ok_or_else(|| eyre!("Unknown theme: {name}")),
            None => Ok(Theme::default()),
        }
    }

    fn options(&self, messages: Vec<Message>) -> Result<EditorOptions> {
        Ok(EditorOptions {
            messages: Some(messages),
            disabled: self.disabled || self.preferences.editor.start_disabled,
            theme: self.resolve_theme()?,
            labels: self.preferences.editor.clone(),
            title: format!("colloquy - {}", self.file.display()),
        })
    }
}

/// The sequence to write back once the editor closes: the final one, and only
/// if the owner was notified at least once.
pub fn messages_to_save(notified: bool, outcome: EditorOutcome) -> Option<Vec<Message>> {
    notified.then_some(outcome.messages)
}

#[async_trait]
impl Command for EditCommand {
    async fn execute(&self) -> Result<()> {
        let messages = load_messages(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?;
        let options = self.options(messages)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Message>>();
        setup_panic_hook();
        let outcome = run_editor(options, move |messages| {
            let _ = tx.send(messages.to_vec());
        })
        .await?;

        let mut notifications = 0usize;
        while rx.try_recv().is_ok() {
            notifications += 1;
        }

        match messages_to_save(notifications > 0, outcome) {
            Some(messages) => {
                save_messages(&self.file, &messages)
                    .wrap_err_with(|| format!("Failed to write {}", self.file.display()))?;
                info!(
                    target: "colloquy::edit",
                    messages = messages.len(),
                    notifications,
                    file = %self.file.display(),
                    "Saved edited conversation"
                );
            }
            None => {
                debug!(target: "colloquy::edit", "No changes; leaving file untouched");
            }
        }
        Ok(())
    }
}
