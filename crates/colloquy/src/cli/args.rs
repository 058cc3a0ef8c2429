use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edit example conversations: ordered input/output messages used to
/// demonstrate a prompt's expected behavior.
#[derive(Parser)]
#[command(version, about, long_about = None, author, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Conversation file to open in the editor when no subcommand is given
    pub file: Option<PathBuf>,

    /// Open the editor read-only
    #[arg(long)]
    pub disabled: bool,

    /// Theme to use for the editor (defaults to "default")
    #[arg(long, env = "COLLOQUY_THEME")]
    pub theme: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Open the interactive editor (default)
    Edit {
        /// Conversation file; created on save if missing
        file: PathBuf,
        /// Open the editor read-only
        #[arg(long)]
        disabled: bool,
        /// Theme to use for the editor (overrides global)
        #[arg(long)]
        theme: Option<String>,
    },
    /// Print the conversation as a table
    Show {
        /// Conversation file
        file: PathBuf,
    },
    /// Replay a JSON Lines transition log against a conversation
    Apply {
        /// Conversation file
        file: PathBuf,
        /// Transition log, one JSON object per line
        transitions: PathBuf,
        /// Where to write the result (defaults to FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Append a prompt and stream the reply from stdin, one fragment per line
    Reply {
        /// Conversation file
        file: PathBuf,
        /// User message to append before the reply
        #[arg(short, long)]
        prompt: String,
    },
}
