use clap::Args;
use tracing::warn;

use crate::cli::{EngineArgs, OutputFormat};
use crate::matching::engine::AnnotationEngine;
use crate::matching::search::MatchResult;

#[derive(Args)]
pub struct PairArgs {
    /// Mass values M as scaled integers, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub m: Vec<i32>,

    /// Adduct values A as scaled integers, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub a: Vec<i32>,

    /// Target value S as a scaled integer
    #[arg(long, allow_negative_numbers = true)]
    pub target: i32,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute pair subcommand
///
/// # Errors
///
/// Returns an error if the engine config cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PairArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.engine.resolve()?;
    let engine = AnnotationEngine::with_config(&args.m, &args.a, config);

    if verbose {
        eprintln!(
            "M: {} distinct of {}, A: {} distinct of {}",
            engine.m_view().len(),
            args.m.len(),
            engine.a_view().len(),
            args.a.len()
        );
    }

    let outcome = engine.query(args.target);
    let search_error = match &outcome {
        Ok(_) => false,
        Err(e) => {
            warn!(target_value = args.target, error = %e, "Search failed, reporting no pair");
            true
        }
    };
    let result = outcome.ok();

    let answer = match result {
        Some(r) => engine.format(r),
        None => engine.config().missing_marker.clone(),
    };

    // Values of the chosen pair, for machine-readable output
    let values = result.and_then(|r| r.pair()).and_then(|(i, j)| {
        let m = engine.m_view().value(i)?;
        let a = engine.a_view().value(j)?;
        Some((m, a))
    });

    let no_pair_reason = match result {
        Some(MatchResult::NoValidPair(reason)) => Some(reason.to_string()),
        _ => None,
    };

    match format {
        OutputFormat::Text => println!("{answer}"),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "target": args.target,
                "answer": answer,
                "m_value": values.map(|(m, _)| m),
                "a_value": values.map(|(_, a)| a),
                "delta": values.map(|(m, a)| i64::from(m) + i64::from(a) - i64::from(args.target)),
                "no_pair_reason": no_pair_reason,
                "search_error": search_error,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("target\tanswer");
            println!("{}\t{answer}", args.target);
        }
    }

    Ok(())
}
