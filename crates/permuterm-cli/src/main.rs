#![allow(clippy::doc_markdown)]
//! `permuterm` CLI - inspect rotation keys and LIKE search keys
//!
//! Usage:
//!   `permuterm permute hello`
//!   `permuterm keys 'hel%' --format json`
//!   `permuterm match '%llo%' hello yellow help`

mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use permuterm_core::{LoggingConfig, PermutermConfig, PermutermIndex, QueryPlanner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "permuterm")]
#[command(
    author,
    version,
    about = "Permuterm CLI - rotation index keys for LIKE wildcard search"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a permuterm.toml configuration file
    #[arg(short, long, global = true, env = "PERMUTERM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format option
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rotation keys stored for a word
    Permute {
        /// Word to rotate
        word: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the search keys for a LIKE pattern
    Keys {
        /// LIKE pattern (`%` and `_` wildcards)
        pattern: String,

        /// Drop low-selectivity keys even if disabled in the configuration
        #[arg(long)]
        prune: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Index the given words and print the candidates for a LIKE pattern
    Match {
        /// LIKE pattern (`%` and `_` wildcards)
        pattern: String,

        /// Words to index
        #[arg(required = true)]
        words: Vec<String>,

        /// Drop low-selectivity keys even if disabled in the configuration
        #[arg(long)]
        prune: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Permute { word, format } => {
            println!("{}", output::render_permute(&word, format)?);
        }
        Commands::Keys {
            pattern,
            prune,
            format,
        } => {
            let planner = planner_for(&config, prune);
            let query = planner.extract_query_keys(&pattern);
            println!(
                "{}",
                output::render_keys(&pattern, planner.strategy_name(), &query, format)?
            );
        }
        Commands::Match {
            pattern,
            words,
            prune,
            format,
        } => {
            let planner = planner_for(&config, prune);
            let mut index = PermutermIndex::new();
            for (id, word) in words.iter().enumerate() {
                index
                    .insert(id as u64, word)
                    .with_context(|| format!("cannot index word {word:?}"))?;
            }

            let candidates = index.search_like(&pattern, &planner)?;
            let matched: Vec<&str> = candidates
                .iter()
                .map(|id| words[id as usize].as_str())
                .collect();
            println!("{}", output::render_match(&pattern, &matched, format)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Loads and validates the configuration; an explicit path must exist.
fn load_config(path: Option<&Path>) -> anyhow::Result<PermutermConfig> {
    let config = match path {
        Some(path) => PermutermConfig::load_required(path)
            .with_context(|| format!("cannot load configuration from {}", path.display()))?,
        None => PermutermConfig::load()?,
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Logs go to stderr; `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let json = logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .init();
}

fn planner_for(config: &PermutermConfig, force_prune: bool) -> QueryPlanner {
    if force_prune && !config.pruning.enabled {
        let mut config = config.clone();
        config.pruning.enabled = true;
        QueryPlanner::from_config(&config)
    } else {
        QueryPlanner::from_config(config)
    }
}
