//! Reference extractors.
//!
//! Four independent passes over the whole-document text (see
//! [`ParsedDocument::full_text`]):
//!
//! - [`dates`]: ISO, slash and long-form dates, normalized to calendar dates
//! - [`persons`]: person names reported by the entity tagger
//! - [`letters`]: "Letter No. ..." citations
//! - [`clauses`]: "Clause", "Article" and "Act" citations
//!
//! Each pass absorbs its own false positives: candidates that fail to parse or sit
//! on the [`StopList`] are dropped, and references that cannot be found verbatim in
//! any content element keep an unresolved page instead of failing.

use super::*;

pub mod clauses;
pub mod dates;
pub mod letters;
pub mod persons;

pub use clauses::{extract_clauses, ClauseKind, ClauseReference};
pub use dates::{extract_dates, normalize_date, DateMatch, DateReference};
pub use letters::{extract_letters, LetterReference};
pub use persons::{extract_persons, PersonReference};

/// Generic terms that are never reported as a person or letter identifier.
///
/// Comparison is exact and case-sensitive, on the trimmed candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopList {
  terms: HashSet<String>,
}

impl StopList {
  /// Builds a stop-list from the given terms.
  pub fn new<I, S>(terms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    Self { terms: terms.into_iter().map(Into::into).collect() }
  }

  /// Whether the trimmed `candidate` is one of the terms.
  pub fn contains(&self, candidate: &str) -> bool { self.terms.contains(candidate.trim()) }

  /// Whether `candidate` is non-blank and not a stop-listed term.
  pub fn accepts(&self, candidate: &str) -> bool {
    !candidate.trim().is_empty() && !self.contains(candidate)
  }
}

impl Default for StopList {
  fn default() -> Self { Self::new(DEFAULT_STOP_LIST) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_stop_list() {
    let stop_list = StopList::default();
    for term in DEFAULT_STOP_LIST {
      assert!(!stop_list.accepts(term), "{term} should be rejected");
    }
    assert!(!stop_list.accepts("  Contractor "));
    assert!(!stop_list.accepts("   "));
    assert!(!stop_list.accepts(""));
    assert!(stop_list.accepts("contractor"));
    assert!(stop_list.accepts("John Smith"));
  }

  #[test]
  fn test_custom_stop_list() {
    let stop_list = StopList::new(["Employer"]);
    assert!(!stop_list.accepts("Employer"));
    assert!(stop_list.accepts("Contractor"));
  }
}
