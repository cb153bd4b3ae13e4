// metamerge CLI - merge fixed/random-effect meta-analysis results
// and label each identifier with a sensitivity-analysis verdict

mod exit_codes;
mod input;
mod merge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use exit_codes::EXIT_SUCCESS;
use merge::{cmd_merge, MergeArgs};

#[derive(Parser)]
#[command(name = "metamerge")]
#[command(about = "Merge fixed- and random-effect meta-analysis results and label each row")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  metamerge
  metamerge T2D
  metamerge T2D --fixed fixed.tsv --random random.tsv --out-dir results/
  metamerge T2D --config merge.toml --summary-json T2D_summary.json

Reads meta_fixed_results.txt and meta_random_results.txt from the current
directory unless told otherwise, writes <PHENOTYPE>_meta_merge_results.txt
and prints that path on stdout.")]
struct Cli {
    /// Phenotype name; the output is <PHENOTYPE>_meta_merge_results.txt [default: pheno].
    /// A directory prefix such as results/T2D is allowed if the directory exists
    phenotype: Option<String>,

    /// Fixed-effect results (tab-separated) [default: meta_fixed_results.txt]
    #[arg(long, env = "METAMERGE_FIXED")]
    fixed: Option<PathBuf>,

    /// Random-effect results (tab-separated) [default: meta_random_results.txt]
    #[arg(long, env = "METAMERGE_RANDOM")]
    random: Option<PathBuf>,

    /// Directory for the merged table (default: current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// TOML config with [columns] / [thresholds] overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write run metadata and label counts as JSON
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,

    /// Suppress the summary line on stderr
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  metamerge-engine ", env!("CARGO_PKG_VERSION"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout is reserved for the output file name
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = cmd_merge(MergeArgs {
        phenotype: cli.phenotype,
        fixed: cli.fixed,
        random: cli.random,
        out_dir: cli.out_dir,
        config: cli.config,
        summary_json: cli.summary_json,
        quiet: cli.quiet,
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
