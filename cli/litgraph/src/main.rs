//! litgraph CLI: inspect, normalize and combine node record documents.

mod commands;
mod config;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::LitgraphConfig;

#[derive(Parser)]
#[command(name = "litgraph", version, about = "Node record document tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file (default: nearest litgraph.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report counts and dangling references
    Check {
        /// Input document
        file: PathBuf,
        /// Treat dangling references as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print one record
    Query {
        /// Input document
        file: PathBuf,
        /// Record number
        number: i32,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a document in canonical form
    Fmt {
        /// Input document
        file: PathBuf,
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Fail if the document is not already canonical
        #[arg(long, conflicts_with = "output")]
        check: bool,
    },
    /// Export records as a JSON array
    Export {
        /// Input document
        file: PathBuf,
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Merge two documents, records of the second winning
    Merge {
        /// Base document
        base: PathBuf,
        /// Document whose records replace the base's
        other: PathBuf,
        /// Output path
        #[arg(long)]
        output: PathBuf,
    },
    /// Show record counts and the content hash
    Stats {
        /// Input document
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    let options = config.load_options();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Check { file, strict } => commands::check::run(&file, &options, strict, &mut out),
        Commands::Query { file, number, json } => {
            commands::query::run(&file, &options, number, json, &mut out)
        }
        Commands::Fmt {
            file,
            output,
            check,
        } => commands::fmt::run(&file, &options, output.as_deref(), check, &mut out),
        Commands::Export { file, output } => {
            commands::export::run(&file, &options, output.as_deref(), &mut out)
        }
        Commands::Merge {
            base,
            other,
            output,
        } => commands::merge::run(&base, &other, &output, &options, &mut out),
        Commands::Stats { file, json } => commands::stats::run(&file, &options, json, &mut out),
    }
}

/// An explicit `--config` must exist; otherwise search upward and fall back
/// to defaults.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<LitgraphConfig> {
    if let Some(path) = explicit {
        return LitgraphConfig::load(path);
    }
    match LitgraphConfig::find_and_load(cwd)? {
        Some((config, dir)) => {
            tracing::debug!(dir = %dir.display(), "using litgraph.toml");
            Ok(config)
        }
        None => Ok(LitgraphConfig::default()),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    use litgraph_text::LoadOptions;

    /// Full workflow: fmt, merge, check, stats.
    #[test]
    fn fmt_merge_check_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.lg");
        let other = dir.path().join("other.lg");
        let canonical = dir.path().join("canonical.lg");
        let merged = dir.path().join("merged.lg");
        std::fs::write(&base, "#2 = I(\"b\")\n  #1 = I(\"a\")\n").unwrap();
        std::fs::write(&other, "#2 = I(\"B\")\n#3 = R(\"to\", 1, 2)\n").unwrap();
        let options = LoadOptions::default();
        let mut out = Vec::new();

        commands::fmt::run(&base, &options, Some(&canonical), false, &mut out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&canonical).unwrap(),
            "#1 = I(\"a\")\n#2 = I(\"b\")\n"
        );
        commands::fmt::run(&canonical, &options, None, true, &mut out).unwrap();

        commands::merge::run(&canonical, &other, &merged, &options, &mut out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&merged).unwrap(),
            "#1 = I(\"a\")\n#2 = I(\"B\")\n#3 = R(\"to\", 1, 2)\n"
        );

        out.clear();
        commands::check::run(&merged, &options, true, &mut out).unwrap();
        let report = String::from_utf8(out.clone()).unwrap();
        assert!(report.contains("3 records"), "{report}");

        out.clear();
        commands::stats::run(&merged, &options, false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Hash:"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn config_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.load_options().max_literal_len, 1024);
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from(["litgraph", "-vv", "query", "doc.lg", "7", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Query { number: 7, json: true, .. }
        ));
        assert!(Cli::try_parse_from(["litgraph", "merge", "a", "b"]).is_err());
    }
}
