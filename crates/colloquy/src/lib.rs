pub mod cli;
pub mod commands;

pub use colloquy_core::{messages, preferences, store};
