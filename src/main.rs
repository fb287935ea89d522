use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("metabolite_annotation=debug,info")
    } else {
        EnvFilter::new("metabolite_annotation=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Solve(args) => {
            cli::solve::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Verify(args) => {
            cli::verify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Pair(args) => {
            cli::pair::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
