use async_trait::async_trait;
use eyre::{Result, WrapErr};
use futures::{Stream, StreamExt};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::{info, warn};

use super::Command;
use colloquy_core::messages::{load_messages, save_messages};
use colloquy_core::store::{begin_reply, stream_reply};
use colloquy_core::{ErrorKind, MessageError, MessageStore, Transition};

/// Status recorded on a reply whose fragment stream broke off
const INTERRUPTED_STATUS: i64 = 499;

pub struct ReplyCommand {
    pub file: PathBuf,
    pub prompt: String,
}

#[async_trait]
impl Command for ReplyCommand {
    async fn execute(&self) -> Result<()> {
        let messages = load_messages(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?;
        let mut store = MessageStore::new(messages);

        let stdin = BufReader::new(tokio::io::stdin());
        let outcome = run_reply(&mut store, &self.prompt, stdin).await;

        // A broken stream still leaves a partial reply worth keeping
        save_messages(&self.file, store.messages())
            .wrap_err_with(|| format!("Failed to write {}", self.file.display()))?;
        let fragments = outcome?;

        info!(
            target: "colloquy::reply",
            fragments,
            messages = store.len(),
            "Reply saved"
        );
        let mut stdout = std::io::stdout();
        writeln!(
            stdout,
            "Streamed {fragments} fragments into message {}",
            store.len().saturating_sub(1)
        )?;
        Ok(())
    }
}

/// Lines of `reader` as reply fragments; every line after the first keeps
/// its leading newline so the accumulated text matches the input.
pub fn line_fragments<R>(reader: R) -> impl Stream<Item = std::io::Result<String>>
where
    R: AsyncBufRead,
{
    LinesStream::new(reader.lines())
        .enumerate()
        .map(|(position, line)| {
            line.map(|line| {
                if position == 0 {
                    line
                } else {
                    format!("\n{line}")
                }
            })
        })
}

/// Append `prompt` and stream `reader` into the assistant reply. A failed
/// stream marks the partial reply with an error annotation.
pub async fn run_reply<R>(store: &mut MessageStore, prompt: &str, reader: R) -> Result<usize>
where
    R: AsyncBufRead,
{
    begin_reply(store, prompt)?;

    match stream_reply(store, line_fragments(reader)).await {
        Ok(fragments) => Ok(fragments),
        Err(e) => {
            warn!(target: "colloquy::reply", "Reply stream failed: {e}");
            let index = store.len().saturating_sub(1);
            store.dispatch(Transition::SetErrorMessage {
                index,
                error: Some(MessageError::new(
                    ErrorKind::App,
                    INTERRUPTED_STATUS,
                    e.to_string(),
                )),
            })?;
            Err(e).wrap_err("Reply stream failed")
        }
    }
}
