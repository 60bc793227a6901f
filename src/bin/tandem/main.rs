//! tandem CLI - build orchestration for mixed CMake and Cargo projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;
use tandem::util::diagnostic::emit;
use tandem::util::Shell;
use tandem::{ConfigError, GlobalContext, Platform, Workspace};

fn main() {
    // Parse CLI
    let cli = Cli::parse();
    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.no_color);

    match run(&cli, &shell) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            match e.downcast_ref::<ConfigError>() {
                Some(config_error) => emit(&config_error.to_diagnostic(), shell.use_color()),
                None => eprintln!("error: {:#}", e),
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, shell: &Shell) -> Result<bool> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tandem=debug")
    } else {
        EnvFilter::new("tandem=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(shell.use_color())
        .with_target(false)
        .without_time()
        .init();

    let ctx = GlobalContext::new()?;

    let platform = Platform::detect()?;
    let ws = Workspace::load(&ctx, platform)?;
    shell.verbose(
        tandem::util::shell::Status::Info,
        format!("Reading paths from {}", ws.config_path().display()),
    );

    if cli.clean {
        commands::clean::execute(&ws, shell)
    } else if cli.validate {
        commands::validate::execute(&ws, shell)
    } else {
        commands::build::execute(&ws, cli, shell)
    }
}
