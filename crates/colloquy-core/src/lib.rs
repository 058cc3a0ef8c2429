// Core colloquy functionality without UI dependencies

pub mod error;
pub mod messages;
pub mod preferences;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use messages::{ErrorKind, Message, MessageError, Role};
pub use store::{MessageStore, Transition, apply};
