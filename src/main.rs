use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use termgif::cli::{Cli, Commands, ConfigCommands};

mod commands;

/// Environment variable holding a tracing filter, e.g. `termgif=debug`.
const LOG_ENV: &str = "TERMGIF_LOG";

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render(args) => commands::render::handle(args),
        Commands::Plan(args) => commands::plan::handle(args),
        Commands::Schemes => commands::schemes::handle(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "termgif", &mut io::stdout());
            Ok(())
        }
    }
}
