use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use treematch::compare::{compare, ValidationFailure};
use treematch::config::Config;
use treematch::file::load_document;
use treematch::logging;
use treematch::matcher::MatcherRegistry;

/// treematch - Structural comparison of JSON documents
#[derive(Parser)]
#[command(name = "treematch")]
#[command(version)]
#[command(about = "Validates a JSON document against an expected control document", long_about = None)]
struct Cli {
    /// Document under test (`-` reads stdin)
    actual: String,

    /// Expected control document (`-` reads stdin)
    expected: String,

    /// Require exact key sets and element counts
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Allow surplus keys and elements in the actual document
    #[arg(long)]
    lenient: bool,

    /// Compare arrays positionally (defaults to the strict setting)
    #[arg(long, value_name = "BOOL")]
    array_order: Option<bool>,

    /// Path to ignore, e.g. `$..timestamp` (repeatable)
    #[arg(short, long = "ignore", value_name = "EXPR")]
    ignore: Vec<String>,

    /// Config file to use instead of ~/.config/treematch/config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Merges command-line flags over the file configuration.
    fn apply(&self, mut config: Config) -> Config {
        if self.strict {
            config.strict = true;
        }
        if self.lenient {
            config.strict = false;
        }
        if self.array_order.is_some() {
            config.check_array_order = self.array_order;
        }
        config.ignore_expressions.extend(self.ignore.iter().cloned());
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(None) => {
            println!("JSON validation successful");
            ExitCode::SUCCESS
        }
        Ok(Some(failure)) => {
            report_failure(&failure);
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns the validation failure, if any; `Err` is reserved for usage and I/O problems.
fn run(cli: &Cli) -> Result<Option<ValidationFailure>> {
    if cli.actual == "-" && cli.expected == "-" {
        anyhow::bail!("Only one of ACTUAL and EXPECTED can be read from stdin");
    }

    let file_config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let config = cli.apply(file_config);

    logging::init(logging::level_for(cli.verbose, &config.log_level));

    let mode = config.mode().context("Invalid ignore expression")?;
    let actual = load_document(&cli.actual)
        .with_context(|| format!("Failed to load actual document '{}'", cli.actual))?;
    let expected = load_document(&cli.expected)
        .with_context(|| format!("Failed to load expected document '{}'", cli.expected))?;

    let matchers = MatcherRegistry::with_defaults();
    Ok(compare(&actual, &expected, &mode, &matchers).err())
}

fn report_failure(failure: &ValidationFailure) {
    eprintln!("JSON validation failed: {}", failure);
    let mut cause = failure.cause();
    while let Some(inner) = cause {
        eprintln!("  caused by: {}", inner);
        cause = inner.cause();
    }
}
