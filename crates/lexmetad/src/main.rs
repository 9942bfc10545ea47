//! Command line front end for the [`lexmeta`] legal metadata extractor.
//!
//! The `lexmeta` binary turns contract PDFs into two JSON artifacts each: the
//! page-indexed parsed content and the extracted legal metadata. It supports:
//! - Writing a configuration file
//! - Processing single documents or whole directories of PDFs
//! - Inspecting a metadata artifact produced earlier
//!
//! # Usage
//!
//! ```bash
//! # Write a configuration, with a few names always tagged as persons
//! lexmeta init --gazetteer "John Smith" --gazetteer "Jane Roe"
//!
//! # Process one document and a directory of documents
//! lexmeta process contract.pdf ./bundle --output-path ./generated
//!
//! # Summarize a metadata artifact
//! lexmeta inspect ./generated/contract_metadata.json
//! ```
//!
//! Logs go to stderr; pass `-v` (repeatable) for more detail and `--log-dir` to
//! also keep a daily rolling log file.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use lexmeta::{config::Config, error::LexmetaError, metadata::LegalMetadata, Lexmeta, ProcessedArtifacts};
use tracing::{debug, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Extract page-indexed legal metadata from contract PDFs")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default
  /// platform-specific config directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// Directory for a daily rolling log file, in addition to stderr
  #[arg(long, global = true)]
  log_dir: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// The configuration file this invocation reads or writes.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }

  /// Loads the configuration.
  ///
  /// An explicitly passed `--config` must exist; the default location falls back
  /// to built-in defaults when nothing has been written there yet.
  fn load_config(&self) -> Result<Config> {
    Ok(match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::load_or_default(Config::default_path())?,
    })
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` overrides the level when set. The returned guard must be held for
/// the lifetime of the program so the file writer flushes.
fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
  let level = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };
  let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  let stderr = fmt::layer()
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .with_filter(filter());

  match log_dir {
    Some(dir) => {
      let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "lexmeta.log"));
      let file = fmt::layer().with_writer(writer).with_ansi(false).with_thread_ids(true).with_filter(filter());
      tracing_subscriber::registry().with(stderr).with(file).init();
      Some(guard)
    },
    None => {
      tracing_subscriber::registry().with(stderr).init();
      None
    },
  }
}

/// Entry point for the lexmeta CLI application
///
/// Exits non-zero when the command fails, including when any document of a
/// `process` batch fails. Failures are reported on stderr:
/// - Configuration files that cannot be read or written
/// - Documents that fail to process
/// - Artifacts that cannot be read
/// - User interaction errors
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  let _guard = setup_logging(cli.verbose, cli.log_dir.as_deref());
  trace!("Parsed command line");

  let result = match cli.command.clone() {
    Commands::Init(options) => init(&cli, &cli.config_path(), options).await,
    Commands::Process(options) => match cli.load_config() {
      Ok(config) => process(&cli, config, options).await,
      Err(e) => Err(e),
    },
    Commands::Inspect(options) => inspect(&cli, options).await,
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      warn!("Command failed: {e:?}");
      let _ = cli.reply(ResponseContent::Error(&e.to_string()));
      ExitCode::FAILURE
    },
  }
}
