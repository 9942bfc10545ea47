//! PDF page decomposition.
//!
//! [`PageParser`] is the seam to whatever decomposes a source document into pages.
//! [`PdfParser`] implements it on top of `lopdf`: it walks each page's content
//! stream to recover words and approximate word boxes, and asks lopdf for the
//! page's raw text. It does not detect tables.

use lopdf::{content::Operation, Document, Encoding, Object, ObjectId};

use super::*;

/// Rough advance width of one glyph as a fraction of the font size.
const APPROX_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Fraction of a character width a `TJ` kerning gap must exceed to separate words.
const WORD_GAP_RATIO: f32 = 0.3;

/// Page height used when a page has no resolvable `MediaBox` (US Letter).
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;

/// Source of decomposed pages for one document.
pub trait PageParser {
  /// Number of pages in the document.
  fn page_count(&self) -> u32;

  /// Decomposes the page with the given 1-based number.
  fn page(&self, number: u32) -> Result<PageLayout>;
}

/// A [`PageParser`] over a PDF loaded with lopdf.
#[derive(Debug)]
pub struct PdfParser {
  document: Document,
  pages:    BTreeMap<u32, ObjectId>,
}

impl PdfParser {
  /// Loads a PDF from disk.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Opening PDF {}", path.display());
    Self::from_document(Document::load(path)?)
  }

  /// Loads a PDF from an in-memory buffer.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> { Self::from_document(Document::load_mem(bytes)?) }

  fn from_document(document: Document) -> Result<Self> {
    if document.is_encrypted() {
      return Err(LexmetaError::EncryptedDocument);
    }
    let pages = document.get_pages();
    debug!("PDF has {} pages", pages.len());
    Ok(Self { document, pages })
  }

  fn page_height(&self, page_id: ObjectId) -> f32 {
    // MediaBox is inheritable, so climb the page tree until one is found.
    let mut current = Some(page_id);
    while let Some(id) = current {
      let Ok(dict) = self.document.get_dictionary(id) else { break };
      if let Ok(media_box) = dict.get(b"MediaBox").and_then(|obj| self.resolve(obj).as_array()) {
        let values: Vec<f32> = media_box.iter().filter_map(number).collect();
        if let [_, y0, _, y1] = values[..] {
          return (y1 - y0).abs();
        }
      }
      current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    DEFAULT_PAGE_HEIGHT
  }

  fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
    match object {
      Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
      _ => object,
    }
  }

  /// Text encodings of the fonts a page references, keyed by resource name.
  ///
  /// Fonts lopdf cannot resolve an encoding for are left out; their strings fall
  /// back to byte-per-character decoding.
  fn font_encodings(&self, page_id: ObjectId) -> BTreeMap<Vec<u8>, Encoding<'_>> {
    let fonts = match self.document.get_page_fonts(page_id) {
      Ok(fonts) => fonts,
      Err(e) => {
        warn!("Could not resolve fonts of page object {:?}: {}", page_id, e);
        return BTreeMap::new();
      },
    };
    fonts
      .into_iter()
      .filter(|(_, font)| font.type_is(b"Font"))
      .filter_map(|(name, font)| match font.get_font_encoding(&self.document) {
        Ok(encoding) => Some((name, encoding)),
        Err(e) => {
          debug!("No usable encoding for font {}: {}", String::from_utf8_lossy(&name), e);
          None
        },
      })
      .collect()
  }
}

impl PageParser for PdfParser {
  fn page_count(&self) -> u32 { self.pages.len() as u32 }

  fn page(&self, number: u32) -> Result<PageLayout> {
    let page_id = *self.pages.get(&number).ok_or(LexmetaError::PageNotFound(number))?;
    let content = self.document.get_and_decode_page_content(page_id)?;

    let mut walker =
      TextWalker::new(self.page_height(page_id)).with_encodings(self.font_encodings(page_id));
    for operation in &content.operations {
      walker.apply(operation);
    }

    let text = match self.document.extract_text(&[number]) {
      Ok(text) => Some(text),
      Err(e) => {
        warn!("Could not extract raw text from page {}: {}", number, e);
        None
      },
    };

    trace!("Page {} yielded {} words", number, walker.words.len());
    Ok(PageLayout { number, words: walker.words, tables: Vec::new(), text })
  }
}

/// Text state tracked while walking a content stream.
struct TextWalker<'a> {
  page_height:  f32,
  font_size:    f32,
  leading:      f32,
  /// Resource name of the font selected by the last `Tf`
  font:         Vec<u8>,
  encodings:    BTreeMap<Vec<u8>, Encoding<'a>>,
  /// Current text matrix `[a b c d e f]`
  text_matrix:  [f32; 6],
  /// Start of the current line, restored by line-advancing operators
  line_matrix:  [f32; 6],
  words:        Vec<Word>,
}

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// One shown character and the x position it was drawn at.
type Glyph = (char, f32);

impl<'a> TextWalker<'a> {
  fn new(page_height: f32) -> Self {
    Self {
      page_height,
      font_size: 12.0,
      leading: 0.0,
      font: Vec::new(),
      encodings: BTreeMap::new(),
      text_matrix: IDENTITY,
      line_matrix: IDENTITY,
      words: Vec::new(),
    }
  }

  fn with_encodings(mut self, encodings: BTreeMap<Vec<u8>, Encoding<'a>>) -> Self {
    self.encodings = encodings;
    self
  }

  fn apply(&mut self, operation: &Operation) {
    let operands = &operation.operands;
    match operation.operator.as_str() {
      "BT" => {
        self.text_matrix = IDENTITY;
        self.line_matrix = IDENTITY;
      },
      "Tf" => {
        if let Some(Ok(name)) = operands.first().map(Object::as_name) {
          self.font = name.to_vec();
        }
        if let Some(size) = operands.get(1).and_then(number) {
          self.font_size = size;
        }
      },
      "TL" =>
        if let Some(leading) = operands.first().and_then(number) {
          self.leading = leading;
        },
      "Tm" => {
        let values: Vec<f32> = operands.iter().filter_map(number).collect();
        if let [a, b, c, d, e, f] = values[..] {
          self.text_matrix = [a, b, c, d, e, f];
          self.line_matrix = self.text_matrix;
        }
      },
      "Td" =>
        if let (Some(tx), Some(ty)) = (operands.first().and_then(number), operands.get(1).and_then(number)) {
          self.translate_line(tx, ty);
        },
      "TD" =>
        if let (Some(tx), Some(ty)) = (operands.first().and_then(number), operands.get(1).and_then(number)) {
          self.leading = -ty;
          self.translate_line(tx, ty);
        },
      "T*" => self.translate_line(0.0, -self.leading),
      "Tj" =>
        if let Some(operand) = operands.first() {
          self.show(operand);
        },
      "'" => {
        self.translate_line(0.0, -self.leading);
        if let Some(operand) = operands.first() {
          self.show(operand);
        }
      },
      "\"" => {
        self.translate_line(0.0, -self.leading);
        if let Some(operand) = operands.get(2) {
          self.show(operand);
        }
      },
      "TJ" =>
        if let Some(Object::Array(elements)) = operands.first() {
          self.show_array(elements);
        },
      _ => {},
    }
  }

  fn translate_line(&mut self, tx: f32, ty: f32) {
    let [a, b, c, d, e, f] = self.line_matrix;
    self.line_matrix = [a, b, c, d, tx * a + ty * c + e, tx * b + ty * d + f];
    self.text_matrix = self.line_matrix;
  }

  fn effective_size(&self) -> f32 {
    let [a, b, ..] = self.text_matrix;
    let scale = (a * a + b * b).sqrt();
    self.font_size * if scale > 0.0 { scale } else { 1.0 }
  }

  fn char_width(&self) -> f32 { self.effective_size() * APPROX_CHAR_WIDTH_RATIO }

  /// Moves the pen by `dx` text-space units along the baseline.
  fn advance(&mut self, dx: f32) {
    let [a, b, ..] = self.text_matrix;
    self.text_matrix[4] += dx * a;
    self.text_matrix[5] += dx * b;
  }

  /// Decodes a string operand with the current font's encoding.
  fn decode(&self, operand: &Object) -> String {
    let Object::String(bytes, _) = operand else { return String::new() };
    self
      .encodings
      .get(&self.font)
      .and_then(|encoding| Document::decode_text(encoding, bytes).ok())
      .filter(|text| !text.is_empty())
      .unwrap_or_else(|| decode_pdf_string(bytes))
  }

  /// Lays out `text` from the current pen position, recording where each character lands.
  fn place(&mut self, text: &str, glyphs: &mut Vec<Glyph>) {
    let [a, b, ..] = self.text_matrix;
    let scale = a.hypot(b);
    let step = if scale > 0.0 { self.char_width() / scale } else { 0.0 };
    for ch in text.chars() {
      glyphs.push((ch, self.text_matrix[4]));
      self.advance(step);
    }
  }

  fn show(&mut self, operand: &Object) {
    let mut glyphs = Vec::new();
    let text = self.decode(operand);
    self.place(&text, &mut glyphs);
    self.emit(&glyphs);
  }

  /// Shows a `TJ` array as one run of text.
  ///
  /// Kerning adjustments move the pen but only split a word when they open a gap
  /// wider than a fraction of a character.
  fn show_array(&mut self, elements: &[Object]) {
    let gap_threshold = self.font_size * APPROX_CHAR_WIDTH_RATIO * WORD_GAP_RATIO;
    let mut glyphs = Vec::new();
    for element in elements {
      match element {
        Object::String(..) => {
          let text = self.decode(element);
          self.place(&text, &mut glyphs);
        },
        other =>
          if let Some(adjustment) = number(other) {
            // Thousandths of text space; negative moves right.
            let dx = -adjustment / 1000.0 * self.font_size;
            if dx > gap_threshold && !glyphs.is_empty() {
              glyphs.push((' ', self.text_matrix[4]));
            }
            self.advance(dx);
          },
      }
    }
    self.emit(&glyphs);
  }

  /// Emits one word per whitespace-separated token of a placed run.
  fn emit(&mut self, glyphs: &[Glyph]) {
    let char_width = self.char_width();
    let size = self.effective_size();
    let bottom = self.page_height - self.text_matrix[5];
    let top = bottom - size;

    for token in glyphs.split(|(ch, _)| ch.is_whitespace()).filter(|token| !token.is_empty()) {
      let x0 = token[0].1;
      let x1 = token[token.len() - 1].1 + char_width;
      let text: String = token.iter().map(|(ch, _)| ch).collect();
      self.words.push(Word::new(
        text,
        BoundingBox::new(f64::from(x0), f64::from(top), f64::from(x1), f64::from(bottom)),
      ));
    }
  }
}

fn number(object: &Object) -> Option<f32> {
  match object {
    Object::Integer(value) => Some(*value as f32),
    Object::Real(value) => Some(*value as f32),
    _ => None,
  }
}

/// Decodes string bytes without font information.
///
/// Bytes starting with the UTF-16BE byte order mark (0xFE 0xFF) are decoded as
/// UTF-16BE; anything else is read byte-per-character as Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
  if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
    let (cow, ..) = encoding_rs::UTF_16BE.decode(rest);
    cow.into_owned()
  } else {
    bytes.iter().map(|&b| char::from(b)).collect()
  }
}
