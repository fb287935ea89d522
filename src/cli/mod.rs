//! Command-line interface for metabolite-annotation.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **solve**: Annotate every target in a problem file and write the answers
//! - **verify**: Solve a problem file and compare against a stored answer file
//! - **pair**: Run a single query against already-scaled integer arrays
//!
//! ## Usage
//!
//! ```text
//! # Write answers for a problem file
//! metabolite-annotation solve 1.txt -o answer1.txt
//!
//! # Check answers against a stored answer file
//! metabolite-annotation verify 1.txt answer1.txt
//!
//! # Per-case statistics as JSON
//! metabolite-annotation solve 1.txt.gz --format json
//!
//! # One ad-hoc query
//! metabolite-annotation pair --m 1,3 --a 1,0 --target 1
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::matching::engine::EngineConfig;

pub mod pair;
pub mod solve;
pub mod verify;

#[derive(Parser)]
#[command(name = "metabolite-annotation")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate metabolite masses with the nearest mass + adduct pair")]
#[command(
    long_about = "metabolite-annotation matches each target mass S against sums of a mass M and an adduct A.\n\nFor every target it reports the 1-based positions of the (M, A) pair whose sum is closest to the target, using a fast bisecting search over the sorted, deduplicated arrays."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate all targets in a problem file
    Solve(solve::SolveArgs),

    /// Solve a problem file and compare with expected answers
    Verify(verify::VerifyArgs),

    /// Find the pair for a single target
    Pair(pair::PairArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Engine options shared by the commands
#[derive(clap::Args, Debug, Default)]
pub struct EngineArgs {
    /// Path to a JSON engine config (delta_ceiling, missing_marker, scale)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Multiplier applied to decimal inputs before truncation
    #[arg(long)]
    pub scale: Option<f64>,

    /// Line written for targets without a pair
    #[arg(long)]
    pub missing_marker: Option<String>,

    /// Only report pairs whose absolute delta is below this value
    #[arg(long)]
    pub delta_ceiling: Option<u64>,
}

impl EngineArgs {
    /// Build the engine config: file (or defaults) first, then flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn resolve(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(marker) = &self.missing_marker {
            config.missing_marker.clone_from(marker);
        }
        if let Some(ceiling) = self.delta_ceiling {
            config.delta_ceiling = ceiling;
        }

        Ok(config)
    }
}
