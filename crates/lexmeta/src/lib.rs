//! Page-indexed content and legal reference extraction for contract PDFs.
//!
//! `lexmeta` takes a legal or contractual PDF and produces two artifacts:
//!
//! - a **parsed document**: every page decomposed into an ordered list of paragraph,
//!   table and figure elements, each tagged with its page number
//! - a **metadata record**: the dates, persons, letter citations and
//!   clause/article/act citations found in the text, each resolved back to the page
//!   it first occurs on
//!
//! # Pipeline
//!
//! ```text
//! PDF ─▶ PageParser ─▶ PageLayout::elements ─▶ ParsedDocument::assemble
//!                                                  │ full_text()
//!                                                  ▼
//!          dates · persons (EntityTagger) · letters · clauses
//!                                                  │ find_page()
//!                                                  ▼
//!                                            LegalMetadata
//! ```
//!
//! # Getting Started
//!
//! ```no_run
//! use lexmeta::{config::Config, Lexmeta};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lexmeta = Lexmeta::builder().with_config(Config::default()).build();
//!
//! // Parse, extract and write both artifacts
//! let artifacts = lexmeta.process("contract.pdf")?;
//! println!("Document date: {}", artifacts.metadata.document_date);
//! println!("Metadata written to {}", artifacts.metadata_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`layout`]: decomposed page input and the page element builder
//! - [`content`]: content elements, document assembly and page resolution
//! - [`pdf`]: the page parser seam and its lopdf implementation
//! - [`tagger`]: the entity tagger seam and deterministic taggers
//! - [`extract`]: the four reference extractors
//! - [`metadata`]: the metadata record and aggregator
//! - [`config`]: TOML configuration
//! - [`error`]: the crate error type
//!
//! Processing is synchronous and keeps no global state: one call handles one
//! document. The tagger is the only shared resource; it is built once and handed
//! out as an immutable [`SharedTagger`](tagger::SharedTagger), so documents can be
//! processed on as many threads as the caller likes.

#![warn(missing_docs)]

use std::{
  collections::{BTreeMap, BTreeSet, HashSet},
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod content;
pub mod error;
pub mod extract;
pub mod layout;
pub mod metadata;
pub mod pdf;
pub mod tagger;

use crate::{config::*, content::*, error::*, extract::StopList, layout::*, metadata::*, pdf::*, tagger::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use lexmeta::{pdf::PdfParser, prelude::*};
///
/// fn pages() -> Result<u32, LexmetaError> {
///   let parser = PdfParser::open("contract.pdf")?;
///   Ok(parser.page_count())
/// }
/// ```
pub mod prelude {
  pub use crate::{error::LexmetaError, pdf::PageParser, tagger::EntityTagger};
}

/// Locations of the artifacts written for one document, and its metadata.
#[derive(Debug, Clone)]
pub struct ProcessedArtifacts {
  /// Path of the `<stem>_parsed.json` artifact
  pub parsed_path:   PathBuf,
  /// Path of the `<stem>_metadata.json` artifact
  pub metadata_path: PathBuf,
  /// The extracted metadata record
  pub metadata:      LegalMetadata,
}

/// Document processor: a configuration plus the process-wide entity tagger.
#[derive(Clone)]
pub struct Lexmeta {
  /// Processing configuration
  pub config: Config,
  /// Tagger shared by every document processed
  pub tagger: SharedTagger,
}

/// Builder for [`Lexmeta`].
#[derive(Default)]
pub struct LexmetaBuilder {
  config: Option<Config>,
  tagger: Option<SharedTagger>,
}

impl LexmetaBuilder {
  /// Uses `config` instead of [`Config::default`].
  pub fn with_config(mut self, config: Config) -> Self {
    self.config = Some(config);
    self
  }

  /// Uses `tagger` instead of the one described by the configuration.
  pub fn with_tagger(mut self, tagger: SharedTagger) -> Self {
    self.tagger = Some(tagger);
    self
  }

  /// Builds the processor, creating the tagger from the configuration if none was given.
  pub fn build(self) -> Lexmeta {
    let config = self.config.unwrap_or_default();
    let tagger = self.tagger.unwrap_or_else(|| build_tagger(&config.tagger));
    Lexmeta { config, tagger }
  }
}

impl Lexmeta {
  /// Starts building a processor.
  pub fn builder() -> LexmetaBuilder { LexmetaBuilder::default() }

  /// Parses a PDF into its ordered content.
  ///
  /// Any unreadable page fails the whole call.
  pub fn parse(&self, path: impl AsRef<Path>) -> Result<ParsedDocument> {
    let parser = PdfParser::open(path)?;
    ParsedDocument::from_parser(&parser)
  }

  /// Extracts legal metadata from an already parsed document.
  pub fn extract(&self, document: &ParsedDocument, document_name: &str) -> LegalMetadata {
    LegalMetadata::extract(document, document_name, self.tagger.as_ref(), &self.config)
  }

  /// Processes one uploaded document end to end.
  ///
  /// Rejects a missing or empty file with [`LexmetaError::InvalidRequest`] before
  /// any parsing. On success both artifacts are written to the configured output
  /// directory as `<stem>_parsed.json` and `<stem>_metadata.json`.
  pub fn process(&self, path: impl AsRef<Path>) -> Result<ProcessedArtifacts> {
    let path = path.as_ref();
    let document_name = validate_upload(path)?;
    info!("Processing {}", path.display());

    let document = self.parse(path)?;
    let metadata = self.extract(&document, &document_name);

    let stem = path.file_stem().map_or_else(|| document_name.clone(), |s| s.to_string_lossy().into_owned());
    std::fs::create_dir_all(&self.config.output_path)?;
    let parsed_path = self.config.output_path.join(format!("{stem}_parsed.json"));
    let metadata_path = self.config.output_path.join(format!("{stem}_metadata.json"));

    std::fs::write(&parsed_path, document.to_json()?)?;
    std::fs::write(&metadata_path, metadata.to_json()?)?;
    debug!("Wrote {} and {}", parsed_path.display(), metadata_path.display());

    Ok(ProcessedArtifacts { parsed_path, metadata_path, metadata })
  }
}

/// Checks that an upload exists and is non-empty, returning its file name.
fn validate_upload(path: &Path) -> Result<String> {
  let document_name = path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .filter(|name| !name.is_empty())
    .ok_or_else(|| LexmetaError::InvalidRequest("No file uploaded".into()))?;

  let metadata = match std::fs::metadata(path) {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound =>
      return Err(LexmetaError::InvalidRequest(format!("{} does not exist", path.display()))),
    Err(e) => return Err(e.into()),
  };
  if !metadata.is_file() {
    return Err(LexmetaError::InvalidRequest(format!("{} is not a file", path.display())));
  }
  if metadata.len() == 0 {
    return Err(LexmetaError::InvalidRequest(format!("{} is empty", path.display())));
  }
  Ok(document_name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rejects_missing_upload() {
    let dir = tempdir().unwrap();
    let lexmeta = Lexmeta::builder().with_config(Config::default().with_output_path(dir.path())).build();

    let result = lexmeta.process(dir.path().join("missing.pdf"));
    assert!(matches!(result, Err(LexmetaError::InvalidRequest(_))));
  }

  #[test]
  fn test_rejects_empty_upload() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.pdf");
    std::fs::write(&empty, b"").unwrap();
    let lexmeta = Lexmeta::builder().with_config(Config::default().with_output_path(dir.path())).build();

    assert!(matches!(
      lexmeta.process(&empty),
      Err(LexmetaError::InvalidRequest(message)) if message.ends_with("is empty")
    ));
    assert!(matches!(
      lexmeta.process(dir.path()),
      Err(LexmetaError::InvalidRequest(message)) if message.ends_with("is not a file")
    ));
    assert!(!dir.path().join("empty_metadata.json").exists());
  }

  #[test]
  fn test_malformed_document_writes_nothing() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("bogus.pdf");
    std::fs::write(&bogus, b"%PDF-1.4 but not really").unwrap();
    let out = dir.path().join("out");
    let lexmeta = Lexmeta::builder().with_config(Config::default().with_output_path(&out)).build();

    assert!(matches!(lexmeta.process(&bogus), Err(LexmetaError::Lopdf(_))));
    assert!(!out.exists());
  }

  #[test]
  fn test_builder_prefers_explicit_tagger() {
    let tagger: SharedTagger = Arc::new(GazetteerTagger::new(["Jane Roe"]));
    let lexmeta = Lexmeta::builder().with_tagger(tagger).build();
    let document = ParsedDocument::assemble(vec![Ok(
      PageLayout::new(1).with_table(Table::new(vec![vec!["Mr. Adam West and Jane Roe".into()]])),
    )])
    .unwrap();

    let metadata = lexmeta.extract(&document, "x.pdf");
    let names: Vec<&str> = metadata.references.persons.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Jane Roe"]);
  }
}
