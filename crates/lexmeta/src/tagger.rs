//! Entity tagging.
//!
//! The person extractor never looks for names itself; it asks an [`EntityTagger`]
//! to label spans of text and keeps the ones labelled [`EntityLabel::Person`].
//! A statistical model can be plugged in behind the trait. The taggers shipped
//! here are deterministic:
//!
//! - [`GazetteerTagger`] labels known names wherever they occur verbatim.
//! - [`HonorificTagger`] labels capitalised names that follow "Mr.", "Dr" and the like.
//! - [`ChainTagger`] runs several taggers and merges their spans in text order.
//!
//! A tagger is built once per process and shared read-only as a [`SharedTagger`].
//!
//! # Examples
//!
//! ```
//! use lexmeta::tagger::{EntityLabel, EntityTagger, GazetteerTagger};
//!
//! let tagger = GazetteerTagger::new(["John Smith"]);
//! let spans = tagger.tag("Approved by John Smith on site.");
//! assert_eq!(spans.len(), 1);
//! assert_eq!(spans[0].text, "John Smith");
//! assert_eq!(spans[0].label, EntityLabel::Person);
//! ```

use std::fmt;

use super::*;

/// Category assigned to a tagged span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
  /// A named person
  Person,
  /// A company, agency or institution
  Organization,
  /// Any other label a tagger may produce, kept verbatim
  Other(String),
}

impl fmt::Display for EntityLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Person => write!(f, "PERSON"),
      Self::Organization => write!(f, "ORG"),
      Self::Other(label) => write!(f, "{label}"),
    }
  }
}

impl From<&str> for EntityLabel {
  fn from(label: &str) -> Self {
    match label {
      "PERSON" => Self::Person,
      "ORG" => Self::Organization,
      other => Self::Other(other.to_string()),
    }
  }
}

/// A labelled span of text.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
  /// Surface text of the span
  pub text:   String,
  /// Category the tagger assigned
  pub label:  EntityLabel,
  /// Byte offset of the span in the tagged text
  pub offset: usize,
}

impl EntitySpan {
  /// Creates a span starting at byte `offset`.
  pub fn new(text: impl Into<String>, label: EntityLabel, offset: usize) -> Self {
    Self { text: text.into(), label, offset }
  }
}

/// Labels spans of text with semantic categories.
pub trait EntityTagger: Send + Sync {
  /// Returns the labelled spans found in `text`, in text order.
  fn tag(&self, text: &str) -> Vec<EntitySpan>;
}

/// Process-wide tagger handle, shared read-only across documents and threads.
pub type SharedTagger = Arc<dyn EntityTagger>;

/// Builds the tagger described by `config`.
pub fn build_tagger(config: &TaggerConfig) -> SharedTagger {
  let mut chain = ChainTagger::default();
  if !config.gazetteer.is_empty() {
    chain = chain.with(GazetteerTagger::new(config.gazetteer.iter().cloned()));
  }
  if config.honorifics {
    chain = chain.with(HonorificTagger);
  }
  debug!("Built entity tagger with {} stage(s)", chain.taggers.len());
  Arc::new(chain)
}

/// Tags every verbatim occurrence of a known name as a person.
#[derive(Debug, Clone, Default)]
pub struct GazetteerTagger {
  names: Vec<String>,
}

impl GazetteerTagger {
  /// Creates a tagger for the given names. Blank names are ignored.
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    let mut names: Vec<String> =
      names.into_iter().map(Into::into).filter(|name: &String| !name.trim().is_empty()).collect();
    // Longest first, so "John Smith Jr" wins over "John Smith" at the same offset.
    names.sort_by(|a, b| b.len().cmp(&a.len()));
    Self { names }
  }
}

impl EntityTagger for GazetteerTagger {
  fn tag(&self, text: &str) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = Vec::new();
    let mut covered_until = 0;
    let mut candidates: Vec<(usize, &str)> = self
      .names
      .iter()
      .flat_map(|name| text.match_indices(name.as_str()).map(|(offset, _)| (offset, name.as_str())))
      .collect();
    candidates.sort_by_key(|(offset, name)| (*offset, std::cmp::Reverse(name.len())));

    for (offset, name) in candidates {
      if offset < covered_until {
        continue;
      }
      covered_until = offset + name.len();
      spans.push(EntitySpan::new(name, EntityLabel::Person, offset));
    }
    spans
  }
}

/// Tags capitalised names introduced by an honorific as persons.
///
/// "Mr. John Smith" yields the span "John Smith"; the honorific is not included.
#[derive(Debug, Clone, Copy, Default)]
pub struct HonorificTagger;

impl EntityTagger for HonorificTagger {
  fn tag(&self, text: &str) -> Vec<EntitySpan> {
    lazy_static! {
      static ref HONORIFIC_NAME: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Dr|Prof|Eng|Sir)\.?[ \t]+((?:[A-Z][a-z]+|[A-Z]\.)(?:[ \t]+(?:[A-Z][a-z]+|[A-Z]\.))*)"
      )
      .unwrap();
    }

    HONORIFIC_NAME
      .captures_iter(text)
      .filter_map(|caps| caps.get(1))
      .map(|name| EntitySpan::new(name.as_str(), EntityLabel::Person, name.start()))
      .collect()
  }
}

/// Runs several taggers over the same text and merges their spans by offset.
#[derive(Default)]
pub struct ChainTagger {
  taggers: Vec<Box<dyn EntityTagger>>,
}

impl ChainTagger {
  /// Appends a tagger to the chain.
  pub fn with(mut self, tagger: impl EntityTagger + 'static) -> Self {
    self.taggers.push(Box::new(tagger));
    self
  }
}

impl EntityTagger for ChainTagger {
  fn tag(&self, text: &str) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = self.taggers.iter().flat_map(|tagger| tagger.tag(text)).collect();
    // Stable, so earlier stages win ties.
    spans.sort_by_key(|span| span.offset);
    spans
  }
}

impl fmt::Debug for ChainTagger {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ChainTagger").field("stages", &self.taggers.len()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn texts(spans: &[EntitySpan]) -> Vec<&str> { spans.iter().map(|s| s.text.as_str()).collect() }

  #[test]
  fn test_label_names() {
    assert_eq!(EntityLabel::Person.to_string(), "PERSON");
    assert_eq!(EntityLabel::from("ORG"), EntityLabel::Organization);
    assert_eq!(EntityLabel::from("GPE"), EntityLabel::Other("GPE".into()));
  }

  #[test]
  fn test_gazetteer_all_occurrences_in_order() {
    let tagger = GazetteerTagger::new(["Jane Roe", "John Smith"]);
    let spans = tagger.tag("John Smith met Jane Roe; John Smith signed.");
    assert_eq!(texts(&spans), vec!["John Smith", "Jane Roe", "John Smith"]);
    assert_eq!(spans[1].offset, 15);
    assert!(spans.iter().all(|s| s.label == EntityLabel::Person));
  }

  #[test]
  fn test_gazetteer_prefers_longest() {
    let tagger = GazetteerTagger::new(["John Smith", "John Smith Jr", " "]);
    let spans = tagger.tag("Witness: John Smith Jr");
    assert_eq!(texts(&spans), vec!["John Smith Jr"]);
  }

  #[test]
  fn test_honorific_names() {
    let spans = HonorificTagger.tag("Attention Mr. John Smith and Dr Amal K. Haddad, cc: Mrs Lee.");
    assert_eq!(texts(&spans), vec!["John Smith", "Amal K. Haddad", "Lee"]);
  }

  #[test]
  fn test_honorific_requires_capitalised_name() {
    assert!(HonorificTagger.tag("Mr. smith and Dr. 5").is_empty());
    assert!(HonorificTagger.tag("Drainage works").is_empty());
  }

  #[test]
  fn test_chain_merges_by_offset() {
    let chain = ChainTagger::default().with(GazetteerTagger::new(["Jane Roe"])).with(HonorificTagger);
    let spans = chain.tag("Mr. Adam West and Jane Roe");
    assert_eq!(texts(&spans), vec!["Adam West", "Jane Roe"]);
  }

  #[test]
  fn test_build_from_config() {
    let tagger = build_tagger(&TaggerConfig { gazetteer: vec!["Jane Roe".into()], honorifics: false });
    assert_eq!(texts(&tagger.tag("Mr. Adam West and Jane Roe")), vec!["Jane Roe"]);
  }
}
