//! Error types for the lexmeta library.
//!
//! Only structural failures surface as errors: an unreadable or encrypted source
//! document, a rejected upload, or a broken configuration/artifact file. Anomalies
//! found while extracting individual references (an unparseable date candidate, a
//! reference whose page cannot be located, a generic name on the stop-list) are
//! absorbed by the extractors and never reach this type.
//!
//! # Examples
//!
//! ```no_run
//! use lexmeta::{error::LexmetaError, pdf::PdfParser};
//!
//! match PdfParser::open("contract.pdf") {
//!   Err(LexmetaError::EncryptedDocument) => println!("Document is password protected"),
//!   Err(LexmetaError::Lopdf(e)) => println!("Malformed PDF: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(_) => println!("Opened!"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`lexmeta`](crate) crate.
pub type Result<T> = core::result::Result<T, LexmetaError>;

/// Errors that can occur when parsing documents and writing their artifacts.
#[derive(Error, Debug)]
pub enum LexmetaError {
  /// PDF parsing and processing errors from the lopdf library.
  ///
  /// Any page that cannot be decoded fails the whole document; no partially
  /// assembled [`ParsedDocument`](crate::content::ParsedDocument) is ever returned.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// The PDF is encrypted and cannot be decomposed without a password.
  #[error("Document is encrypted")]
  EncryptedDocument,

  /// A page number outside `1..=page_count` was requested from a page parser.
  #[error("Page {0} does not exist in this document")]
  PageNotFound(u32),

  /// The upload was missing, empty or not a regular file and was rejected before any processing.
  #[error("Invalid request: {0}")]
  InvalidRequest(String),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An artifact could not be serialized or deserialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration could not be written as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A `document_date` value was neither an ISO date nor the "not found" sentinel.
  #[error("Invalid document date: {0}")]
  InvalidDocumentDate(String),
}
