//! `panekeep` - save and restore terminal multiplexer pane layouts
//!
//! Captures WezTerm tabs, windows and workspaces into JSON snapshots and
//! rebuilds them later by replaying binary splits.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use panekeep_core::config::AppSettings;
use panekeep_core::tracing::{TracingLevel, init_tracing};

fn init_logging(settings: &AppSettings, verbose: u8, quiet: bool) {
    let mut config = settings.logging.tracing_config(verbose);
    if quiet {
        config = config.with_level(TracingLevel::Error);
    }
    if let Err(e) = init_tracing(&config) {
        eprintln!("Warning: logging disabled: {e}");
    }
}

fn main() {
    let cli = Cli::parse();

    let result = util::load_context(cli.config.as_deref()).and_then(|ctx| {
        init_logging(&ctx.settings, cli.verbose, cli.quiet);
        commands::dispatch(&ctx, cli.command)
    });

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
