use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{EngineArgs, OutputFormat};
use crate::matching::engine::{AnnotationEngine, Annotations, EngineConfig};
use crate::parsing::problem::{parse_problem_file, ProblemCase};

#[derive(Args)]
pub struct SolveArgs {
    /// Problem file (plain or .gz); use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Execute solve subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.engine.resolve()?;
    let cases = load_cases(&args.input, &config)?;

    if verbose {
        eprintln!(
            "Parsed {} test cases from {}",
            cases.len(),
            args.input.display()
        );
    }

    let results = annotate_cases(&cases, &config);

    if verbose {
        let errors: usize = results.iter().map(|r| r.error_count).sum();
        let missing: usize = results.iter().map(|r| r.no_pair_count).sum();
        eprintln!("{missing} distinct targets without a pair, {errors} search errors");
    }

    let rendered = match format {
        OutputFormat::Text => render_answers(&results),
        OutputFormat::Json => render_json(&args.input, &results)?,
        OutputFormat::Tsv => render_tsv(&results),
    };

    write_output(args.output.as_deref(), &rendered)
}

/// Parse a problem file with the configured scale
///
/// # Errors
///
/// Returns an error if the problem file cannot be read or parsed.
pub fn load_cases(path: &Path, config: &EngineConfig) -> anyhow::Result<Vec<ProblemCase>> {
    parse_problem_file(path, config.scale)
        .with_context(|| format!("Failed to parse problem file {}", path.display()))
}

/// Annotate each case with its own engine
pub fn annotate_cases(cases: &[ProblemCase], config: &EngineConfig) -> Vec<Annotations> {
    cases
        .iter()
        .map(|case| AnnotationEngine::with_config(&case.m, &case.a, config.clone()).annotate(&case.s))
        .collect()
}

/// Answer-file text: each case's lines followed by a newline
pub fn render_answers(results: &[Annotations]) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&result.to_text());
        out.push('\n');
    }
    out
}

fn render_json(input: &Path, results: &[Annotations]) -> anyhow::Result<String> {
    let cases: Vec<_> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            serde_json::json!({
                "case": i + 1,
                "targets": r.lines.len(),
                "distinct_targets": r.distinct_targets,
                "cache_hits": r.cache_hits,
                "no_pair": r.no_pair_count,
                "errors": r.error_count,
                "answers": r.lines,
            })
        })
        .collect();

    let output = serde_json::json!({
        "input": input.display().to_string(),
        "cases": cases,
    });

    Ok(format!("{}\n", serde_json::to_string_pretty(&output)?))
}

fn render_tsv(results: &[Annotations]) -> String {
    let mut out = String::from("case\ttargets\tdistinct_targets\tcache_hits\tno_pair\terrors\n");
    for (i, r) in results.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            r.lines.len(),
            r.distinct_targets,
            r.cache_hits,
            r.no_pair_count,
            r.error_count
        );
    }
    out
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
