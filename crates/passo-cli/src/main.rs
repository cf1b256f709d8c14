//! Passo CLI - a password manager with encrypted local storage and optional
//! cloud sync.
//!
//! This is the command-line interface for Passo. It is a thin layer over
//! `passo-core`: it wires up storage from the config file, shows the core's
//! notices, and maps failures to exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;

use clap::{CommandFactory, Parser};

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, generate, init, misc, preferences};
use crate::errors::{exit_code_for, hint_for};
use crate::output::{print_error, UiContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        tracing::debug!(error = ?e, "command failed");
        let ui = UiContext::fallback();
        let hint = hint_for(&e);
        print_error(&ui, &format!("{:#}", e), hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // These need neither config nor storage.
    match command {
        Commands::Generate(args) => return generate::handle_generate(args),
        Commands::Completions(args) => return misc::handle_completions(args),
        _ => {}
    }

    let ctx = AppContext::new(cli)?;
    match command {
        Commands::Init(args) => init::handle_init(&ctx, args),
        Commands::Add(args) => entries::handle_add(&ctx, args).await,
        Commands::List(args) => entries::handle_list(&ctx, args).await,
        Commands::Search(args) => entries::handle_search(&ctx, args).await,
        Commands::Show(args) => entries::handle_show(&ctx, args).await,
        Commands::Edit(args) => entries::handle_edit(&ctx, args).await,
        Commands::Delete(args) => entries::handle_delete(&ctx, args).await,
        Commands::Mode(args) => preferences::handle_mode(&ctx, args).await,
        Commands::Theme(args) => preferences::handle_theme(&ctx, args),
        Commands::Generate(_) | Commands::Completions(_) => Ok(()),
    }
}
