//! Decomposed page input and the page element builder.
//!
//! A [`PageLayout`] is what a [`PageParser`] yields for one page: the words it
//! found (each with a bounding box), any tables as grids of cell strings, and the
//! page's raw text. [`PageLayout::elements`] turns that into the flat, ordered list
//! of [`ContentElement`]s that the rest of the pipeline consumes.
//!
//! Words are not merged into lines or sentences: each token becomes
//! its own paragraph element.
//!
//! # Examples
//!
//! ```
//! use lexmeta::{
//!   content::ContentElement,
//!   layout::{BoundingBox, PageLayout, Table, Word},
//! };
//!
//! let page = PageLayout::new(2)
//!   .with_word(Word::new("Clause", BoundingBox::new(72.0, 90.0, 110.0, 102.0)))
//!   .with_table(Table::new(vec![vec!["Item".into(), "Due".into()]]))
//!   .with_text("Figure 1: Site plan");
//!
//! let elements = page.elements();
//! assert_eq!(elements.len(), 3);
//! assert!(matches!(elements[2], ContentElement::Figure { .. }));
//! ```

use super::*;

/// Axis-aligned box of a word on the page, `[x0, top, x1, bottom]`.
///
/// Coordinates use a top-left origin, the convention of most PDF layout tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
  /// Left edge
  pub x0:     f64,
  /// Distance of the upper edge from the top of the page
  pub top:    f64,
  /// Right edge
  pub x1:     f64,
  /// Distance of the baseline from the top of the page
  pub bottom: f64,
}

impl BoundingBox {
  /// Creates a box from its edges in `[x0, top, x1, bottom]` order.
  pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self { Self { x0, top, x1, bottom } }
}

impl From<[f64; 4]> for BoundingBox {
  fn from([x0, top, x1, bottom]: [f64; 4]) -> Self { Self { x0, top, x1, bottom } }
}

impl From<BoundingBox> for [f64; 4] {
  fn from(bbox: BoundingBox) -> Self { [bbox.x0, bbox.top, bbox.x1, bbox.bottom] }
}

/// A single word recovered from a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
  /// Word text, without surrounding whitespace
  pub text: String,
  /// Where the word sits on the page
  pub bbox: BoundingBox,
}

impl Word {
  /// Creates a word.
  pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
    Self { text: text.into(), bbox }
  }
}

/// A table as a grid of cell strings, row-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
  /// Cell text, one vector per row
  pub rows: Vec<Vec<String>>,
}

impl Table {
  /// Creates a table from its rows.
  pub fn new(rows: Vec<Vec<String>>) -> Self { Self { rows } }

  /// Plain-text rendering: cells joined by `" | "`, rows joined by newlines.
  pub fn to_text(&self) -> String {
    self.rows.iter().map(|row| row.join(" | ")).collect::<Vec<_>>().join("\n")
  }

  /// HTML rendering with one `<tr>` per row and one `<td>` per cell.
  ///
  /// Cell text is emitted as-is.
  pub fn to_html(&self) -> String {
    let mut html = String::from("<table>");
    for row in &self.rows {
      html.push_str("<tr>");
      for cell in row {
        html.push_str("<td>");
        html.push_str(cell);
        html.push_str("</td>");
      }
      html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
  }
}

/// Everything a page parser recovered from one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
  /// 1-based page number
  pub number: u32,
  /// Words in extraction order
  pub words:  Vec<Word>,
  /// Tables in extraction order
  pub tables: Vec<Table>,
  /// Raw page text, `None` when the parser could not provide any
  pub text:   Option<String>,
}

impl PageLayout {
  /// An empty layout for page `number`; fill it with the `with_*` builders.
  pub fn new(number: u32) -> Self { Self { number, ..Default::default() } }

  /// Appends a word.
  pub fn with_word(mut self, word: Word) -> Self {
    self.words.push(word);
    self
  }

  /// Appends a table.
  pub fn with_table(mut self, table: Table) -> Self {
    self.tables.push(table);
    self
  }

  /// Sets the raw page text used for caption detection.
  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  /// Converts the page into content elements.
  ///
  /// Order is: one paragraph per non-empty word, then one element per table, then
  /// exactly one figure marker. The figure is emitted whether or not the page holds
  /// an image; it carries the placeholder filename `page_<n>.png` and the first
  /// caption found in the raw text.
  pub fn elements(&self) -> Vec<ContentElement> {
    let mut elements = Vec::with_capacity(self.words.len() + self.tables.len() + 1);

    for word in &self.words {
      let text = word.text.trim();
      if text.is_empty() {
        continue;
      }
      elements.push(ContentElement::Paragraph {
        text:        text.to_string(),
        page_number: self.number,
        metadata:    ParagraphMetadata { bbox: word.bbox },
      });
    }

    for table in &self.tables {
      elements.push(ContentElement::Table {
        text:        table.to_text(),
        html:        table.to_html(),
        page_number: self.number,
        metadata:    serde_json::Map::new(),
      });
    }

    elements.push(ContentElement::Figure {
      image_filename: format!("page_{}.png", self.number),
      caption:        extract_caption(self.text.as_deref()),
      page_number:    self.number,
      metadata:       serde_json::Map::new(),
    });

    trace!("Page {} produced {} elements", self.number, elements.len());
    elements
  }
}

/// Returns the first figure caption in `text`, or an empty string.
///
/// A caption starts at "Figure" or "Fig" (any case), optionally followed by
/// separators, a numeral and punctuation, and runs to the end of that line.
pub fn extract_caption(text: Option<&str>) -> String {
  lazy_static! {
    static ref CAPTION: Regex = Regex::new(r"(?i)(Figure|Fig)[\s\-:]*(\d+)?[:.\-]?\s*(.+)").unwrap();
  }

  let Some(text) = text else { return String::new() };
  CAPTION.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}
