use async_trait::async_trait;
use eyre::{Result, WrapErr};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::Command;
use colloquy_core::messages::{load_messages, save_messages};
use colloquy_core::{Message, MessageStore, Transition};

pub struct ApplyCommand {
    pub file: PathBuf,
    pub transitions: PathBuf,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

#[async_trait]
impl Command for ApplyCommand {
    async fn execute(&self) -> Result<()> {
        let messages = load_messages(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?;
        let log = std::fs::read_to_string(&self.transitions)
            .wrap_err_with(|| format!("Failed to read {}", self.transitions.display()))?;

        let (count, result) = replay_log(messages, &log)?;

        let mut stdout = std::io::stdout();
        if self.dry_run {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
            return Ok(());
        }

        let output = self.output.as_ref().unwrap_or(&self.file);
        save_messages(output, &result)
            .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
        info!(
            target: "colloquy::apply",
            transitions = count,
            messages = result.len(),
            output = %output.display(),
            "Applied transition log"
        );
        writeln!(
            stdout,
            "Applied {count} transitions; {} messages written to {}",
            result.len(),
            output.display()
        )?;
        Ok(())
    }
}

/// Fold a JSON Lines log over `messages`, returning the number of transitions
/// and the final sequence. The first bad line or failing transition aborts.
pub fn replay_log(messages: Vec<Message>, log: &str) -> Result<(usize, Vec<Message>)> {
    let transitions = Transition::parse_log(log).wrap_err("Invalid transition log")?;
    let count = transitions.len();
    let store = MessageStore::replay(messages, transitions)?;
    Ok((count, store.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_log_folds_in_order() {
        let log = r#"
{"type":"addMessage","message":{"role":"user","content":"Hi"}}
{"type":"addMessage","message":{"role":"assistant","content":""}}
{"type":"updateMessage","index":1,"message":"Hello"}
"#;
        let (count, messages) = replay_log(Vec::new(), log).unwrap();
        assert_eq!(count, 3);
        assert_eq!(messages, vec![Message::user("Hi"), Message::assistant("Hello")]);
    }

    #[test]
    fn test_replay_log_rejects_unknown_kind() {
        let err = replay_log(Vec::new(), r#"{"type":"shuffleMessages"}"#).unwrap_err();
        assert!(format!("{err:?}").contains("shuffleMessages"));
    }

    #[test]
    fn test_replay_log_stops_on_out_of_range() {
        let err = replay_log(
            vec![Message::user("Hi")],
            r#"{"type":"updateMessageRole","index":2,"role":"assistant"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
