//! The legal metadata record and the aggregator that builds it.
//!
//! [`LegalMetadata::extract`] runs the four reference extractors over one
//! [`ParsedDocument`] and assembles their results. It adds no filtering of its own;
//! the only derived value is [`LegalMetadata::document_date`], which is the first
//! (earliest) entry of the sorted date list, or "not found".
//!
//! Serialized, the record is wrapped as `{"metadata": {...}}` (see
//! [`MetadataArtifact`]):
//!
//! ```json
//! {
//!   "metadata": {
//!     "document_name": "contract.pdf",
//!     "document_date": "2024-01-01",
//!     "dates": [{ "date": "2024-01-01", "surrounding_context": "..." }],
//!     "references": {
//!       "letters_mentioned": [{ "name": "XYZ-123", "page_number": -1 }],
//!       "laws_clauses_articles_acts": [{ "reference": "Article 5", "type": "article", "page_number": -1 }],
//!       "persons": [{ "name": "John Smith", "page_number": -1 }]
//!     }
//!   }
//! }
//! ```

use std::fmt;

use crate::extract::{
  extract_clauses, extract_dates, extract_letters, extract_persons, ClauseReference, DateReference,
  LetterReference, PersonReference,
};

use super::*;

/// Serialized value of a missing document date.
pub const DATE_NOT_FOUND: &str = "not found";

/// The date chosen to represent the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DocumentDate {
  /// Earliest date in the text
  Found(NaiveDate),
  /// The text holds no dates
  NotFound,
}

impl fmt::Display for DocumentDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Found(date) => write!(f, "{}", date.format("%Y-%m-%d")),
      Self::NotFound => write!(f, "{DATE_NOT_FOUND}"),
    }
  }
}

impl From<DocumentDate> for String {
  fn from(date: DocumentDate) -> Self { date.to_string() }
}

impl TryFrom<String> for DocumentDate {
  type Error = LexmetaError;

  fn try_from(value: String) -> Result<Self> {
    if value == DATE_NOT_FOUND {
      return Ok(Self::NotFound);
    }
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
      .map(Self::Found)
      .map_err(|_| LexmetaError::InvalidDocumentDate(value))
  }
}

/// All non-date references found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
  /// Every letter citation, in text order
  pub letters_mentioned:          Vec<LetterReference>,
  /// Distinct clause, article and act citations
  pub laws_clauses_articles_acts: Vec<ClauseReference>,
  /// Distinct person names
  pub persons:                    Vec<PersonReference>,
}

/// Legal-domain metadata for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMetadata {
  /// File name of the source document
  pub document_name: String,
  /// First entry of `dates`, if any
  pub document_date: DocumentDate,
  /// Sorted by date, then by position in the text
  pub dates:         Vec<DateReference>,
  /// Letters, citations and persons
  pub references:    References,
}

impl LegalMetadata {
  /// Runs every reference extractor over `document`.
  ///
  /// The extractors read [`ParsedDocument::full_text`]; references are located
  /// back to pages with [`ParsedDocument::find_page`].
  pub fn extract(
    document: &ParsedDocument,
    document_name: impl Into<String>,
    tagger: &dyn EntityTagger,
    config: &Config,
  ) -> Self {
    let document_name = document_name.into();
    let text = document.full_text();
    let stop_list = config.stop_list();

    let dates = extract_dates(&text, config.context_window);
    let document_date = dates.first().map_or(DocumentDate::NotFound, |d| DocumentDate::Found(d.date));

    let references = References {
      persons:                    extract_persons(&text, tagger, &stop_list, document),
      letters_mentioned:          extract_letters(&text, &stop_list, document),
      laws_clauses_articles_acts: extract_clauses(&text, document),
    };

    info!(
      "Extracted metadata for {}: {} dates, {} letters, {} clauses, {} persons",
      document_name,
      dates.len(),
      references.letters_mentioned.len(),
      references.laws_clauses_articles_acts.len(),
      references.persons.len(),
    );

    Self { document_name, document_date, dates, references }
  }

  /// Serializes the record in its artifact form, `{"metadata": {...}}`.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(&MetadataArtifact { metadata: self.clone() })?)
  }

  /// Reads a record from its artifact form.
  pub fn from_json(json: &str) -> Result<Self> {
    Ok(serde_json::from_str::<MetadataArtifact>(json)?.metadata)
  }
}

/// On-disk wrapper of a [`LegalMetadata`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataArtifact {
  /// The wrapped record
  pub metadata: LegalMetadata,
}
