//! Streaming an assistant reply into the last message of a store.

use futures::{Stream, StreamExt};
use tracing::debug;

use crate::error::{Error, Result};
use crate::messages::Message;
use crate::store::state::MessageStore;
use crate::store::transition::Transition;

/// Collects reply fragments in arrival order.
///
/// Each call to [`ReplyAccumulator::push`] yields the transition that replaces
/// the latest message with everything received so far.
#[derive(Debug, Default, Clone)]
pub struct ReplyAccumulator {
    chunks: Vec<String>,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) -> Transition {
        self.chunks.push(fragment.into());
        Transition::UpdateLatestBotMessage {
            chunks: self.chunks.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}

/// Append the user's prompt and an empty assistant placeholder for the reply
/// to stream into.
pub fn begin_reply(store: &mut MessageStore, prompt: impl Into<String>) -> Result<()> {
    store.dispatch(Transition::AddUserMessage {
        content: prompt.into(),
    })?;
    store.dispatch(Transition::AddMessage {
        message: Message::assistant(""),
    })?;
    Ok(())
}

/// Drive `fragments` into the latest message of `store`, returning how many
/// fragments were consumed. The first fragment error ends the stream.
pub async fn stream_reply<S, E>(store: &mut MessageStore, fragments: S) -> Result<usize>
where
    S: Stream<Item = std::result::Result<String, E>>,
    E: Into<Error>,
{
    let mut fragments = std::pin::pin!(fragments);
    let mut accumulator = ReplyAccumulator::new();

    while let Some(fragment) = fragments.next().await {
        let fragment = fragment.map_err(Into::into)?;
        let transition = accumulator.push(fragment);
        store.dispatch(transition)?;
    }

    debug!(
        target: "colloquy::store",
        fragments = accumulator.len(),
        bytes = accumulator.text().len(),
        "Reply stream finished"
    );
    Ok(accumulator.len())
}
