//! MessageStore - owner of a live message sequence

use tracing::warn;

use crate::error::Result;
use crate::messages::Message;
use crate::store::reduce::apply;
use crate::store::transition::Transition;

/// Holds a message sequence and advances it one transition at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<Message>,
    /// Revision number for dirty tracking
    revision: u64,
}

impl MessageStore {
    pub fn new(initial: Vec<Message>) -> Self {
        Self {
            messages: initial,
            revision: 0,
        }
    }

    /// Fold `transitions` over `initial`, stopping at the first failure.
    pub fn replay<I>(initial: Vec<Message>, transitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Transition>,
    {
        let mut store = Self::new(initial);
        for transition in transitions {
            store.dispatch(transition)?;
        }
        Ok(store)
    }

    /// Apply a transition. On failure the held sequence is left as it was.
    pub fn dispatch(&mut self, transition: Transition) -> Result<&[Message]> {
        let kind = transition.kind();
        match apply(&self.messages, transition) {
            Ok(next) => {
                self.messages = next;
                self.revision += 1;
                Ok(&self.messages)
            }
            Err(e) => {
                warn!(target: "colloquy::store", kind, error = %e, "Transition rejected");
                Err(e)
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Owned copy of the current sequence
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }
}
