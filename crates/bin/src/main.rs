use std::{io::Write, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod document;
mod output;

use cli::{Cli, Commands};
use document::Document;
use output::OutputFormat;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("error: {e}");
            // 1 is reserved for `exists` reporting a missing address
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dotpath=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from(cli.format);
    let load = || Document::load(cli.file.as_deref());
    let mut stdout = std::io::stdout().lock();
    let out = &mut stdout;

    match &cli.command {
        Commands::Get(args) => commands::read::get(args, &load()?, format, out)?,
        Commands::Require(args) => commands::read::require(args, &load()?, format, out)?,
        Commands::Exists(args) => {
            if !commands::read::exists(args, &load()?, format, out)? {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Set(args) => commands::write::set(args, &mut load()?, format, out)?,
        Commands::Init(args) => commands::write::init(args, &mut load()?, format, out)?,
        Commands::Create(args) => commands::write::create(args, &mut load()?, format, out)?,
        Commands::Remove(args) => commands::write::remove(args, &mut load()?, format, out)?,
        Commands::Flatten => commands::flat::flatten(&load()?, format, out)?,
        Commands::Expand => commands::flat::expand(&load()?, format, out)?,
        Commands::Join(args) => commands::flat::join(args, format, out)?,
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
