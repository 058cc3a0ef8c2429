//! Reading and writing message files (a JSON array of messages).

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::Message;
use crate::error::Result;

/// Load a message file. A missing file is an empty conversation.
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    if !path.exists() {
        debug!(target: "colloquy::messages", path = %path.display(), "Message file missing, starting empty");
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let messages: Vec<Message> = serde_json::from_str(&contents)?;
    debug!(target: "colloquy::messages", path = %path.display(), count = messages.len(), "Loaded messages");
    Ok(messages)
}

/// Write a message file atomically: the data lands in a temp file next to
/// `path` and is renamed over it.
pub fn save_messages(path: &Path, messages: &[Message]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&dir)?;

    let mut file = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut file, messages)?;
    file.write_all(b"\n")?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!(target: "colloquy::messages", path = %path.display(), count = messages.len(), "Saved messages");
    Ok(())
}
