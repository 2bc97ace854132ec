//! Consensus CLI
//!
//! Reads two rankings as JSON and prints their consensus ranking and
//! contradiction core.
//!
//! # Usage
//!
//! ```bash
//! # Inline rankings
//! consensus-cli '[1,[2,3],4]' '[[1,2],3,4]'
//!
//! # Rankings from files, with intermediate matrices
//! consensus-cli @first.json @second.json --explain --pretty
//!
//! # Fail instead of guessing when cluster order is cyclic
//! CONSENSUS_CYCLE_POLICY=reject consensus-cli @a.json @b.json
//! ```

mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use consensus::{parse_ranking, ConsensusConfig, ConsensusEngine, CyclePolicy};
use serde::Serialize;
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First ranking: inline JSON or @path to a JSON file
    first: String,

    /// Second ranking: inline JSON or @path to a JSON file
    second: String,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cycle handling (overrides config file and CONSENSUS_CYCLE_POLICY)
    #[arg(long)]
    cycle_policy: Option<CyclePolicy>,

    /// Include every intermediate matrix in the output
    #[arg(long, default_value_t = false)]
    explain: bool,

    /// Pretty-print the output JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ConsensusConfig> {
        let base = match &self.config {
            Some(path) => ConsensusConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConsensusConfig::default(),
        };
        let mut config = base
            .with_env_overrides()
            .context("Invalid environment override")?;
        if let Some(policy) = self.cycle_policy {
            config.cycle_policy = policy;
        }
        Ok(config)
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn run(args: &Args) -> Result<String> {
    let config = args.resolve_config()?;
    let first = parse_ranking(&input::read_ranking_arg(&args.first)?)
        .context("Failed to parse first ranking")?;
    let second = parse_ranking(&input::read_ranking_arg(&args.second)?)
        .context("Failed to parse second ranking")?;

    let engine = ConsensusEngine::new(config);
    let (outcome, trace) = engine.trace(&first, &second)?;
    info!(
        objects = trace.universe.len(),
        contradictions = outcome.contradiction_core.len(),
        positions = outcome.consensus_ranking.len(),
        "Consensus computed"
    );

    if args.explain {
        to_json(
            &serde_json::json!({ "outcome": outcome, "trace": trace }),
            args.pretty,
        )
    } else {
        to_json(&outcome, args.pretty)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    println!("{}", run(&args)?);
    Ok(())
}
