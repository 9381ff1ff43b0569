//! Exports Manager CLI
//!
//! Maps the structured export request onto the reconciliation core and
//! reports the outcome for humans or automation.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;
use exports_core::{Action, ExportRequest};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Add {
            path,
            clients,
            name,
            read_write,
            no_root_squash,
            all_squash,
            security,
            options,
            clear_all,
            no_update,
            dry_run,
        } => {
            let request = ExportRequest {
                name,
                action: Action::Add,
                update: !no_update,
                clear_all,
                path,
                clients,
                read_only: !read_write,
                root_squash: !no_root_squash,
                all_squash,
                security,
                options,
            };
            commands::run_request(&cli.file, &request, dry_run, cli.json)
        }
        Commands::Remove {
            path,
            clients,
            name,
            clear_all,
            no_update,
            dry_run,
        } => {
            let request = ExportRequest {
                name,
                action: Action::Remove,
                update: !no_update,
                clear_all,
                path,
                clients,
                read_only: true,
                root_squash: true,
                all_squash: false,
                security: exports_model::DEFAULT_SECURITY.to_string(),
                options: String::new(),
            };
            commands::run_request(&cli.file, &request, dry_run, cli.json)
        }
        Commands::Apply { request, dry_run } => {
            commands::run_request_file(&cli.file, &request, dry_run, cli.json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
