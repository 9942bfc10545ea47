//! Clause, article and act citations.

use std::fmt;

use super::*;

lazy_static! {
  static ref CITATION: Regex = Regex::new(r"(Clause|Article|Act)\s+(\d+(?:\.\d+)?)").unwrap();
}

/// Kind of legal provision cited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
  /// A clause of the document itself, `Clause 4.2`
  Clause,
  /// `Article 5`
  Article,
  /// A cited statute, `Act 1996`
  Act,
}

impl fmt::Display for ClauseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Clause => write!(f, "Clause"),
      Self::Article => write!(f, "Article"),
      Self::Act => write!(f, "Act"),
    }
  }
}

/// A cited clause, article or act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseReference {
  /// Canonical form, `"<Kind> <number[.sub]>"`
  pub reference:   String,
  /// Which kind of provision is cited, serialized as `type`
  #[serde(rename = "type")]
  pub kind:        ClauseKind,
  /// First page the canonical reference occurs on
  #[serde(with = "page_sentinel")]
  pub page_number: Option<u32>,
}

/// Extracts distinct clause/article/act citations in first-occurrence order.
///
/// Matching is case-sensitive. Whitespace between the kind and the number is
/// normalized to a single space, so `"Clause   4.2"` and `"Clause 4.2"` are the
/// same reference.
pub fn extract_clauses(text: &str, document: &ParsedDocument) -> Vec<ClauseReference> {
  let mut seen = HashSet::new();
  let clauses: Vec<ClauseReference> = CITATION
    .captures_iter(text)
    .filter_map(|caps| {
      let kind = match &caps[1] {
        "Clause" => ClauseKind::Clause,
        "Article" => ClauseKind::Article,
        _ => ClauseKind::Act,
      };
      let reference = format!("{kind} {}", &caps[2]);
      if !seen.insert(reference.clone()) {
        return None;
      }
      let page_number = document.find_page(&reference);
      Some(ClauseReference { reference, kind, page_number })
    })
    .collect();
  debug!("Found {} clause/article/act references", clauses.len());
  clauses
}

#[cfg(test)]
mod tests {
  use super::*;

  fn references(text: &str) -> Vec<String> {
    extract_clauses(text, &ParsedDocument::default()).into_iter().map(|c| c.reference).collect()
  }

  #[test]
  fn test_whitespace_canonicalization() {
    assert_eq!(references("Clause 4.2 and again Clause   4.2\nand Clause\t4.2"), vec!["Clause 4.2"]);
  }

  #[test]
  fn test_kinds_and_numbers() {
    let clauses = extract_clauses("Article 5, Act 1996 and Clause 12.3.4", &ParsedDocument::default());
    let rendered: Vec<(&str, ClauseKind)> = clauses.iter().map(|c| (c.reference.as_str(), c.kind)).collect();
    assert_eq!(
      rendered,
      vec![("Article 5", ClauseKind::Article), ("Act 1996", ClauseKind::Act), ("Clause 12.3", ClauseKind::Clause)]
    );
  }

  #[test]
  fn test_case_sensitive() {
    assert!(references("clause 4 and ARTICLE 7 and act 3").is_empty());
  }

  #[test]
  fn test_sub_clause_is_distinct() {
    assert_eq!(references("Clause 4 then Clause 4.1"), vec!["Clause 4", "Clause 4.1"]);
  }

  #[test]
  fn test_page_resolution_uses_canonical_form() {
    let document = ParsedDocument::assemble(vec![Ok(PageLayout::new(1)
      .with_table(Table::new(vec![vec!["Clause 4.2".into(), "Payment".into()]])))])
    .unwrap();
    let clauses = extract_clauses("Clause   4.2 and Clause 9", &document);
    assert_eq!(clauses[0].page_number, Some(1));
    assert_eq!(clauses[1].page_number, None);
  }

  #[test]
  fn test_serialized_type_field() {
    let clause = ClauseReference { reference: "Act 1996".into(), kind: ClauseKind::Act, page_number: Some(3) };
    assert_eq!(
      serde_json::to_string(&clause).unwrap(),
      r#"{"reference":"Act 1996","type":"act","page_number":3}"#
    );
  }
}
