use async_trait::async_trait;
use comfy_table::{Cell, Color, Table};
use eyre::{Result, WrapErr};
use std::io::Write;
use std::path::PathBuf;

use super::Command;
use colloquy_core::Message;
use colloquy_core::messages::load_messages;

pub struct ShowCommand {
    pub file: PathBuf,
}

#[async_trait]
impl Command for ShowCommand {
    async fn execute(&self) -> Result<()> {
        let messages = load_messages(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?;

        let mut stdout = std::io::stdout();
        if messages.is_empty() {
            writeln!(stdout, "No messages.")?;
            return Ok(());
        }

        writeln!(stdout, "{}", message_table(&messages))?;
        Ok(())
    }
}

pub fn message_table(messages: &[Message]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").fg(Color::Green),
        Cell::new("Role").fg(Color::Green),
        Cell::new("Content").fg(Color::Green),
        Cell::new("Choices").fg(Color::Green),
        Cell::new("Error").fg(Color::Green),
    ]);

    for (index, message) in messages.iter().enumerate() {
        let error = match &message.error {
            Some(error) => Cell::new(format!(
                "{} {}: {}",
                error.kind, error.status, error.message
            ))
            .fg(Color::Red),
            None => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(message.role),
            Cell::new(&message.content),
            Cell::new(message.choice_count()),
            error,
        ]);
    }

    table
}
