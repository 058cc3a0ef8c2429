pub mod reduce;
pub mod state;
pub mod stream;
pub mod transition;

#[cfg(test)]
mod tests;

pub use reduce::apply;
pub use state::MessageStore;
pub use stream::{ReplyAccumulator, begin_reply, stream_reply};
pub use transition::Transition;
