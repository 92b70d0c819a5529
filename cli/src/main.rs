//! `esa` command: print esa.io teams and posts as pretty JSON.
//!
//! Reads `ESA_ACCESS_TOKEN` (and optionally `ESA_BASE_URL`) from the
//! environment or a `.env` file. Logs go to stderr, filtered by `RUST_LOG`.

use std::convert::Infallible;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use esa_core::{ClientConfig, ConfigError, Esa, EsaError, FilterMap};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esa")]
#[command(about = "Read teams and posts from the esa.io API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the teams the access token can see
    Teams,

    /// Show a single post
    Post {
        /// Team name, as in `<team>.esa.io`
        team: String,

        /// Team-scoped post number
        number: u64,
    },

    /// Search posts in a team
    Posts {
        /// Team name, as in `<team>.esa.io`
        team: String,

        /// Filters: `key=value`, `key:value`, or a bare search word
        #[arg(value_name = "FILTER", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] EsaError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// `key=value` and `key:value` become a keyed filter; anything else is a
/// bare search term.
fn parse_filter(arg: &str) -> Result<(String, String), Infallible> {
    Ok(match arg.split_once('=').or_else(|| arg.split_once(':')) {
        Some((key, value)) => (key.to_string(), value.to_string()),
        None => (String::new(), arg.to_string()),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands) -> Result<(), CliError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.base_url, "configured");
    let esa = Esa::from_config(&config);

    match command {
        Commands::Teams => print_json(&esa.teams().list_teams()?),
        Commands::Post { team, number } => print_json(&esa.posts().get_post(&team, number)?),
        Commands::Posts { team, filters } => {
            let filters: FilterMap = filters.into_iter().collect();
            print_json(&esa.posts().list_posts(&team, &filters)?)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
