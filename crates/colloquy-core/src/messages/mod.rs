pub mod file;
pub mod message;

pub use file::{load_messages, save_messages};
pub use message::{ErrorKind, Message, MessageError, Role};
