//! Parsed document content and the page resolver.
//!
//! A [`ParsedDocument`] is the ordered list of [`ContentElement`]s for one source
//! document: page-ascending, and within a page in the order the page element
//! builder produced them (words, then tables, then one figure marker). It is built
//! once by [`ParsedDocument::assemble`] and read-only afterwards.
//!
//! The same structure is the first output artifact, serialized as
//! `{"content": [...]}` with each element's `type` tag first.

use super::*;

/// Location metadata attached to paragraph elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParagraphMetadata {
  /// Box of the word on its page
  pub bbox: BoundingBox,
}

/// One unit of extracted page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentElement {
  /// A single word from the page
  Paragraph {
    /// The word
    text:        String,
    /// 1-based page the word is on
    page_number: u32,
    /// Word location
    metadata:    ParagraphMetadata,
  },
  /// A table with plain-text and HTML renderings
  Table {
    /// Plain-text rendering, see [`Table::to_text`]
    text:        String,
    /// `<table>` rendering of the same cells
    html:        String,
    /// 1-based page the table is on
    page_number: u32,
    /// Always empty
    metadata:    serde_json::Map<String, serde_json::Value>,
  },
  /// The per-page figure marker
  Figure {
    /// Synthetic name, `page_<n>_figure.png`
    image_filename: String,
    /// Text after the first `Figure` or `Fig.` on the page, or empty
    caption:        String,
    /// 1-based page the marker belongs to
    page_number:    u32,
    /// Always empty
    metadata:       serde_json::Map<String, serde_json::Value>,
  },
}

impl ContentElement {
  /// Searchable text of this element. Figure markers have none; their caption is
  /// kept apart from the text the extractors read.
  pub fn text(&self) -> &str {
    match self {
      Self::Paragraph { text, .. } | Self::Table { text, .. } => text,
      Self::Figure { .. } => "",
    }
  }

  /// Page this element belongs to.
  pub fn page_number(&self) -> u32 {
    match self {
      Self::Paragraph { page_number, .. }
      | Self::Table { page_number, .. }
      | Self::Figure { page_number, .. } => *page_number,
    }
  }
}

/// The full ordered content of one source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
  /// Elements in page order
  pub content: Vec<ContentElement>,
}

impl ParsedDocument {
  /// Builds a document from pages given in page order.
  ///
  /// The first failing page aborts assembly and its error is returned unchanged;
  /// no partial document is produced.
  pub fn assemble<I>(pages: I) -> Result<Self>
  where I: IntoIterator<Item = Result<PageLayout>> {
    let mut content = Vec::new();
    let mut page_count = 0;
    for page in pages {
      let page = page?;
      content.extend(page.elements());
      page_count += 1;
    }
    debug!("Assembled {} elements from {} pages", content.len(), page_count);
    Ok(Self { content })
  }

  /// Parses every page of `parser`, numbering pages from 1.
  pub fn from_parser<P: PageParser + ?Sized>(parser: &P) -> Result<Self> {
    Self::assemble((1..=parser.page_count()).map(|number| parser.page(number)))
  }

  /// Text of all elements joined by single spaces, in content order.
  ///
  /// Figure markers contribute an empty string, so they still add a separator.
  pub fn full_text(&self) -> String {
    self.content.iter().map(ContentElement::text).collect::<Vec<_>>().join(" ")
  }

  /// Page of the first element whose text contains `fragment` verbatim.
  ///
  /// The match is a case-sensitive substring test over elements in content order;
  /// `None` when no element contains the fragment. This is a linear scan, run once
  /// per distinct reference.
  pub fn find_page(&self, fragment: &str) -> Option<u32> {
    self.content.iter().find(|element| element.text().contains(fragment)).map(ContentElement::page_number)
  }

  /// Number of distinct pages represented in the content.
  pub fn page_count(&self) -> usize {
    self.content.iter().map(ContentElement::page_number).collect::<BTreeSet<_>>().len()
  }

  /// Serializes the document as the parsed-content artifact.
  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

  /// Reads a parsed-content artifact back.
  pub fn from_json(json: &str) -> Result<Self> { Ok(serde_json::from_str(json)?) }
}

/// Serde adapter storing an optional page as its number, or `-1` when absent.
pub mod page_sentinel {
  use serde::{Deserialize, Deserializer, Serializer};

  /// Page value meaning "fragment not located in any element".
  pub const NOT_LOCATED: i64 = -1;

  /// Writes `None` as [`NOT_LOCATED`].
  pub fn serialize<S: Serializer>(page: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(page.map_or(NOT_LOCATED, i64::from))
  }

  /// Reads a page number, mapping [`NOT_LOCATED`] to `None` and rejecting other values below 1.
  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = i64::deserialize(deserializer)?;
    if value == NOT_LOCATED {
      return Ok(None);
    }
    u32::try_from(value).ok().filter(|page| *page >= 1).map(Some).ok_or_else(|| {
      serde::de::Error::custom(format!("page number must be >= 1 or {NOT_LOCATED}, got {value}"))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn word(text: &str) -> Word { Word::new(text, BoundingBox::new(0.0, 0.0, 10.0, 10.0)) }

  fn sample() -> ParsedDocument {
    ParsedDocument::assemble(vec![
      Ok(PageLayout::new(1).with_word(word("Agreement")).with_word(word("dated"))),
      Ok(PageLayout::new(2).with_table(Table::new(vec![vec!["Clause 4.2".into(), "Fees".into()]]))),
      Ok(PageLayout::new(3).with_word(word("Signed:JohnSmith")).with_text("Fig 1 Signature")),
    ])
    .unwrap()
  }

  #[test]
  fn test_assemble_orders_pages() {
    let doc = sample();
    let pages: Vec<u32> = doc.content.iter().map(ContentElement::page_number).collect();
    assert_eq!(pages, vec![1, 1, 1, 2, 2, 3, 3]);
    assert_eq!(doc.page_count(), 3);
  }

  #[test]
  fn test_assemble_fails_whole_document() {
    let result = ParsedDocument::assemble(vec![
      Ok(PageLayout::new(1).with_word(word("ok"))),
      Err(LexmetaError::PageNotFound(2)),
      Ok(PageLayout::new(3)),
    ]);
    assert!(matches!(result, Err(LexmetaError::PageNotFound(2))));
  }

  #[test]
  fn test_zero_pages() {
    let doc = ParsedDocument::assemble(Vec::new()).unwrap();
    assert!(doc.content.is_empty());
    assert_eq!(doc.full_text(), "");
  }

  #[test]
  fn test_full_text_keeps_figure_separators() {
    let doc = sample();
    assert_eq!(doc.full_text(), "Agreement dated  Clause 4.2 | Fees  Signed:JohnSmith ");
  }

  #[test]
  fn test_find_page() {
    let doc = sample();
    assert_eq!(doc.find_page("Agreement"), Some(1));
    assert_eq!(doc.find_page("Clause 4.2"), Some(2));
    assert_eq!(doc.find_page("JohnSmith"), Some(3));
    assert_eq!(doc.find_page("agreement"), None);
    assert_eq!(doc.find_page("Signature"), None);
  }

  #[test]
  fn test_json_shape() {
    let doc = ParsedDocument::assemble(vec![Ok(PageLayout::new(1).with_word(word("Hi")))]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
    assert_eq!(value["content"][0]["type"], "paragraph");
    assert_eq!(value["content"][0]["text"], "Hi");
    assert_eq!(value["content"][0]["metadata"]["bbox"], serde_json::json!([0.0, 0.0, 10.0, 10.0]));
    assert_eq!(value["content"][1]["type"], "figure");
    assert_eq!(value["content"][1]["image_filename"], "page_1.png");
    assert!(value["content"][1].get("text").is_none());
  }

  #[test]
  fn test_round_trip() {
    let doc = sample();
    assert_eq!(ParsedDocument::from_json(&doc.to_json().unwrap()).unwrap(), doc);
  }

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Located {
    #[serde(with = "page_sentinel")]
    page_number: Option<u32>,
  }

  #[test]
  fn test_page_sentinel() {
    assert_eq!(serde_json::to_string(&Located { page_number: None }).unwrap(), r#"{"page_number":-1}"#);
    assert_eq!(serde_json::to_string(&Located { page_number: Some(3) }).unwrap(), r#"{"page_number":3}"#);
    let parsed: Located = serde_json::from_str(r#"{"page_number":-1}"#).unwrap();
    assert_eq!(parsed.page_number, None);
    assert!(serde_json::from_str::<Located>(r#"{"page_number":0}"#).is_err());
    assert!(serde_json::from_str::<Located>(r#"{"page_number":-7}"#).is_err());
  }
}
