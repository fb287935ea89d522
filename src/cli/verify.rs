use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::solve::{annotate_cases, load_cases, render_answers};
use crate::cli::{EngineArgs, OutputFormat};
use crate::parsing::answers::{compare_answers, read_answer_file, Comparison};

#[derive(Args)]
pub struct VerifyArgs {
    /// Problem file (plain or .gz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Expected answer file
    #[arg(required = true)]
    pub expected: PathBuf,

    /// Number of mismatched lines to show
    #[arg(short = 'n', long, default_value = "10")]
    pub max_mismatches: usize,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute verify subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read, or if the answers differ.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: VerifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.engine.resolve()?;
    let cases = load_cases(&args.input, &config)?;
    let expected = read_answer_file(&args.expected)
        .with_context(|| format!("Failed to read answers {}", args.expected.display()))?;

    if verbose {
        eprintln!(
            "Verifying {} test cases from {} against {}",
            cases.len(),
            args.input.display(),
            args.expected.display()
        );
    }

    let actual = render_answers(&annotate_cases(&cases, &config));
    let comparison = compare_answers(&expected, &actual);

    match format {
        OutputFormat::Text => print_text(&args, &comparison),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Tsv => print_tsv(&comparison),
    }

    if !comparison.is_match() {
        anyhow::bail!(
            "Answers differ from {}: {} of {} lines mismatched",
            args.expected.display(),
            comparison.mismatches.len(),
            comparison.lines_compared
        );
    }

    Ok(())
}

fn print_text(args: &VerifyArgs, comparison: &Comparison) {
    if comparison.is_match() {
        println!(
            "OK: {} lines match {}",
            comparison.lines_compared,
            args.expected.display()
        );
        return;
    }

    println!(
        "MISMATCH: {} of {} lines differ from {}",
        comparison.mismatches.len(),
        comparison.lines_compared,
        args.expected.display()
    );
    if comparison.mismatches.is_empty() {
        println!("  Lines match but whitespace or trailing newlines differ");
    }
    for mismatch in comparison.mismatches.iter().take(args.max_mismatches) {
        println!(
            "  line {}: expected {:?}, got {:?}",
            mismatch.line,
            mismatch.expected.as_deref().unwrap_or("<none>"),
            mismatch.actual.as_deref().unwrap_or("<none>")
        );
    }
    if comparison.mismatches.len() > args.max_mismatches {
        println!(
            "  ... and {} more",
            comparison.mismatches.len() - args.max_mismatches
        );
    }
}

fn print_tsv(comparison: &Comparison) {
    println!("lines_compared\tmismatches\tbyte_identical");
    println!(
        "{}\t{}\t{}",
        comparison.lines_compared,
        comparison.mismatches.len(),
        comparison.byte_identical
    );
}
