//! CLI argument definitions for the dotpath binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Format {
    /// Plain text for people
    #[default]
    Human,
    /// Compact JSON for scripts
    Json,
}

/// Read and edit JSON documents by dotted path
#[derive(Parser, Debug)]
#[command(name = "dotpath")]
#[command(about = "dotpath: read and edit nested JSON documents by dotted path")]
#[command(version)]
pub struct Cli {
    /// JSON document to operate on. Read from stdin when absent.
    #[arg(short, long, global = true, env = "DOTPATH_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human", env = "DOTPATH_FORMAT")]
    pub format: Format,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at an address
    Get(GetArgs),
    /// Print the value at an address, failing if it is missing
    Require(RequireArgs),
    /// Exit successfully if a value is stored at an address
    Exists(AddressArgs),
    /// Write a value at an address
    Set(SetArgs),
    /// Write a value unless one is already stored, then print the stored value
    Init(InitArgs),
    /// Walk an address, creating missing containers, and print the result
    Create(CreateArgs),
    /// Remove the value at an address and print it
    Remove(AddressArgs),
    /// Print the document as a flat map of dotted paths
    Flatten,
    /// Rebuild a nested document from a flat map of dotted paths
    Expand,
    /// Join parts into one dotted path
    Join(JoinArgs),
}

/// A single address argument
#[derive(clap::Args, Debug)]
pub struct AddressArgs {
    /// Dotted address, e.g. server.port
    pub address: String,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Dotted address, e.g. server.port
    pub address: String,

    /// Value to print when nothing is stored (JSON, or a plain string)
    #[arg(long)]
    pub fallback: Option<String>,
}

/// Arguments for the require command
#[derive(clap::Args, Debug)]
pub struct RequireArgs {
    /// Dotted address, e.g. server.port
    pub address: String,

    /// Error message used when the address is missing
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Dotted address, e.g. server.port
    pub address: String,

    /// Value to store (JSON, or a plain string)
    pub value: String,

    /// Replace a value that is already stored
    #[arg(long)]
    pub overwrite: bool,

    /// Report what would happen without saving
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the write instead of failing on conflicts
    #[arg(long)]
    pub ignore_errors: bool,

    /// Replace leaf values blocking the path with containers
    #[arg(long)]
    pub hard: bool,
}

/// Arguments for the init command
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Dotted address, e.g. cache.users
    pub address: String,

    /// Value to store if nothing is there yet (JSON, or a plain string)
    pub default: String,
}

/// Arguments for the create command
#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Dotted address, e.g. jobs.queue
    pub address: String,

    /// Named factory for a missing final value
    /// (empty-map, empty-list, empty-text, zero, false, null)
    #[arg(short, long, default_value = "empty-map")]
    pub default: String,

    /// Only report whether the address exists; create nothing
    #[arg(long)]
    pub check_only: bool,
}

/// Arguments for the join command
#[derive(clap::Args, Debug)]
pub struct JoinArgs {
    /// Parts to join; parts may already contain dots
    #[arg(required = true)]
    pub parts: Vec<String>,
}
