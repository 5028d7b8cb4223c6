//! @ai:module:intent CLI for the apidoc documentation generator
//! @ai:module:layer presentation

use anyhow::{bail, Context, Result};
use apidoc::{app, vars, Config, Diagnostics, Error};
use apidoc_parser::Language;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "apidoc")]
#[command(about = "Generate REST API documentation from source code comments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation (default)
    Run {
        /// Path to configuration file, defaults to apidoc.toml in the working directory.
        /// Relative paths inside it are resolved against its directory.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Working directory
        #[arg(short, long)]
        wd: Option<PathBuf>,
    },

    /// Write a default configuration file for a project
    Init {
        /// Project directory to document
        #[arg(short, long)]
        wd: Option<PathBuf>,
    },

    /// List supported source languages
    Langs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        return ExitCode::from(1);
    }

    let command = cli.command.unwrap_or(Commands::Run {
        config: None,
        wd: None,
    });

    match execute(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code(&e)
        }
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("apidoc=info".parse()?),
        )
        .init();
    Ok(())
}

async fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run { config, wd } => {
            let wd = working_dir(wd)?;
            let config = match config {
                Some(path) if path.is_relative() => wd.join(path),
                Some(path) => path,
                None => wd.join(vars::DEFAULT_CONFIG_FILENAME),
            };

            let summary = app::run(&config, &Diagnostics::tracing()).await?;

            println!(
                "{} {} APIs written to {} in {:.2?}",
                "Done:".green().bold(),
                summary.apis,
                summary.output_dir.display(),
                summary.elapsed
            );
        }

        Commands::Init { wd } => {
            let wd = working_dir(wd)?;
            let path = wd.join(vars::DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                bail!("{} already exists", path.display());
            }

            let config = Config::generate(&wd);
            config.save(&path)?;

            println!("{} {}", "Created".green().bold(), path.display());
            if config.inputs.iter().any(|input| input.lang.is_empty()) {
                println!(
                    "{} no source language detected, set `lang` before running",
                    "Note:".yellow().bold()
                );
            }
        }

        Commands::Langs => {
            for lang in Language::all() {
                println!("{:<12} {}", lang.name(), lang.extensions().join(", "));
            }
        }
    }

    Ok(())
}

fn working_dir(wd: Option<PathBuf>) -> Result<PathBuf> {
    match wd {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("Failed to determine the working directory"),
    }
}

/// Configuration problems exit with 2, anything else with 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<Error>() {
        Some(Error::Options(_) | Error::ConfigRead { .. } | Error::ConfigParse { .. }) => {
            ExitCode::from(2)
        }
        _ => ExitCode::from(1),
    }
}
