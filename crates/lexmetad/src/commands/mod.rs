//! The `lexmeta` subcommands.

use super::*;

pub mod init;
pub mod inspect;
pub mod process;

pub use init::{init, InitOptions};
pub use inspect::{inspect, InspectOptions};
pub use process::{process, ProcessOptions};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a lexmeta configuration file
  Init(InitOptions),

  /// Extract content and legal metadata from PDF documents
  Process(ProcessOptions),

  /// Summarize a metadata artifact written by `process`
  Inspect(InspectOptions),
}
