//! vba-blocks CLI - A package manager for VBA projects

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vba_blocks::util::diagnostic::emit;
use vba_blocks::{GlobalContext, ManifestError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("vba_blocks=debug")
    } else {
        EnvFilter::new("vba_blocks=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut ctx = match GlobalContext::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    };
    ctx.set_color(!cli.no_color && std::io::stderr().is_terminal());

    if let Err(e) = run(&ctx, cli.command) {
        match e.downcast_ref::<ManifestError>() {
            Some(err) => emit(&err.to_diagnostic(), ctx.color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(ctx: &GlobalContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => commands::init::execute(ctx, args),
        Commands::Check(args) => commands::check::execute(ctx, args),
        Commands::Tree(args) => commands::tree::execute(ctx, args),
        Commands::Normalize(args) => commands::normalize::execute(ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
