//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Exports Manager - Idempotent NFS export rule management
#[derive(Parser, Debug)]
#[command(name = "exportctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exports file to manage
    #[arg(long, global = true, default_value = "/etc/exports")]
    pub file: PathBuf,

    /// Output the outcome as JSON for automation
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add or update an export rule
    ///
    /// Examples:
    ///   exportctl add /share -c 10.0.0.0/24 --read-write
    ///   exportctl add /home -c '*' --clear-all --security krb5p:krb5i
    Add {
        /// Absolute path to export (must exist)
        path: String,

        /// Client specifier: '*', hostname, IP, CIDR, '*.domain', '@netgroup'
        #[arg(short = 'c', long = "client", required = true)]
        clients: Vec<String>,

        /// Reference text echoed back in the outcome
        #[arg(long, default_value = "exportctl")]
        name: String,

        /// Allow clients to write (exports are read-only by default)
        #[arg(long)]
        read_write: bool,

        /// Do not map requests from uid/gid 0 to the anonymous identity
        #[arg(long)]
        no_root_squash: bool,

        /// Map all requests to the anonymous identity
        #[arg(long)]
        all_squash: bool,

        /// Colon-delimited security flavors to negotiate (sys, krb5, krb5i, krb5p)
        #[arg(long, default_value = "sys")]
        security: String,

        /// Extra export options, comma or space delimited
        #[arg(long, default_value = "")]
        options: String,

        /// Discard all existing export directives first
        #[arg(long)]
        clear_all: bool,

        /// Do not reload the export table after a change
        #[arg(long)]
        no_update: bool,

        /// Print the resulting file without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove an export rule; removing an absent rule is not an error
    Remove {
        /// Exported path
        path: String,

        /// Client specifier to remove (matched literally)
        #[arg(short = 'c', long = "client", required = true)]
        clients: Vec<String>,

        /// Reference text echoed back in the outcome
        #[arg(long, default_value = "exportctl")]
        name: String,

        /// Discard all existing export directives first
        #[arg(long)]
        clear_all: bool,

        /// Do not reload the export table after a change
        #[arg(long)]
        no_update: bool,

        /// Print the resulting file without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply a JSON request file (a single request or an array, in order)
    Apply {
        /// Path to the request file
        request: PathBuf,

        /// Print the resulting file without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
