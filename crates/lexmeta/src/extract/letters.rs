//! Letter citation extraction.
//!
//! Matches "Letter", an optional "No." or "Number", and the identifier that
//! follows (word characters, hyphens and slashes), case-insensitively. Citations
//! are reported in match order and are *not* deduplicated: a letter cited three
//! times appears three times.

use super::*;

lazy_static! {
  static ref LETTER: Regex = Regex::new(r"(?i)Letter\s+(?:No\.|Number)?\s*([\w\-/]+)").unwrap();
}

/// A cited letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterReference {
  /// The captured letter identifier
  pub name:        String,
  /// First page containing the identifier
  #[serde(with = "page_sentinel")]
  pub page_number: Option<u32>,
}

/// Extracts every letter citation in `text`, duplicates included.
///
/// Identifiers on the stop-list are skipped.
pub fn extract_letters(
  text: &str,
  stop_list: &StopList,
  document: &ParsedDocument,
) -> Vec<LetterReference> {
  let letters: Vec<LetterReference> = LETTER
    .captures_iter(text)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str())
    .filter(|name| stop_list.accepts(name))
    .map(|name| {
      trace!("Letter citation {:?}", name);
      LetterReference { name: name.to_string(), page_number: document.find_page(name) }
    })
    .collect();
  debug!("Found {} letter citations", letters.len());
  letters
}
