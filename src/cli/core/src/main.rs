/* src/cli/core/src/main.rs */

mod check;
mod config;
mod logging;
mod transform;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{TruthConfig, find_truth_config, load_truth_config};

#[derive(Parser)]
#[command(name = "truth", about = "Rewrite comparison blocks into native {#if} markup", version)]
struct Cli {
  /// Print debug logs to stderr (overrides TRUTH_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Transform one template and write the result
  Transform {
    /// Template to transform
    input: PathBuf,
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Also write a source map next to the output as `<out>.map`
    #[arg(long, requires = "out")]
    map: bool,
    /// Path to truth.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Validate templates without writing anything
  Check {
    /// Templates to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Path to truth.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config (explicit path or truth.toml found upward); defaults when none exists
fn resolve_config(explicit: Option<PathBuf>) -> Result<TruthConfig> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      match find_truth_config(&cwd)? {
        Some(p) => p,
        None => {
          tracing::debug!("no truth.toml found, using defaults");
          return Ok(TruthConfig::default());
        }
      }
    }
  };
  tracing::debug!(path = %path.display(), "loading config");
  load_truth_config(&path)
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose)?;

  match cli.command {
    Command::Transform { input, out, map, config } => {
      let config = resolve_config(config)?;
      transform::run_transform(&config, &input, out.as_deref(), map)?;
    }
    Command::Check { files, config } => {
      let config = resolve_config(config)?;
      check::run_check(&config, &files)?;
    }
  }

  Ok(())
}
