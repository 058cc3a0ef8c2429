use clap::{CommandFactory, Parser};
use eyre::Result;

use colloquy::cli::{Cli, Commands};
use colloquy::commands::{
    Command, apply::ApplyCommand, edit::EditCommand, reply::ReplyCommand, show::ShowCommand,
};
use colloquy_core::preferences::Preferences;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize tracing (level configured via RUST_LOG env var)
    colloquy_core::utils::tracing::init_tracing()?;

    let preferences = Preferences::load_or_default();
    debug!(target: "colloquy", ?preferences, "Loaded preferences");

    let command: Box<dyn Command> = match cli.command {
        Some(Commands::Edit {
            file,
            disabled,
            theme,
        }) => Box::new(EditCommand {
            file,
            disabled: disabled || cli.disabled,
            theme: theme.or(cli.theme),
            preferences,
        }),
        Some(Commands::Show { file }) => Box::new(ShowCommand { file }),
        Some(Commands::Apply {
            file,
            transitions,
            output,
            dry_run,
        }) => Box::new(ApplyCommand {
            file,
            transitions,
            output,
            dry_run,
        }),
        Some(Commands::Reply { file, prompt }) => Box::new(ReplyCommand { file, prompt }),
        None => match cli.file {
            Some(file) => Box::new(EditCommand {
                file,
                disabled: cli.disabled,
                theme: cli.theme,
                preferences,
            }),
            None => {
                Cli::command().print_help()?;
                return Ok(());
            }
        },
    };

    command.execute().await
}
