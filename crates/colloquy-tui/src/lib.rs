pub mod error;
pub mod tui;

// Expose the editor entry points
pub use tui::{EditorOptions, EditorOutcome, MessageListView, run_editor, setup_panic_hook};
