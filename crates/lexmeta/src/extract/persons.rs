//! Person extraction from entity-tagger output.

use super::*;

/// A person named in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonReference {
  /// Trimmed name as the tagger reported it
  pub name:        String,
  /// First page containing the name
  #[serde(with = "page_sentinel")]
  pub page_number: Option<u32>,
}

/// Extracts the distinct persons the tagger finds in `text`.
///
/// The tagger runs once over the whole text. Spans not labelled as persons are
/// ignored, names are trimmed, blank or stop-listed names are rejected, and
/// duplicates (exact, case-sensitive) keep their first occurrence. Each surviving
/// name is located in `document` with [`ParsedDocument::find_page`].
pub fn extract_persons(
  text: &str,
  tagger: &dyn EntityTagger,
  stop_list: &StopList,
  document: &ParsedDocument,
) -> Vec<PersonReference> {
  let mut seen = HashSet::new();
  let persons: Vec<PersonReference> = tagger
    .tag(text)
    .into_iter()
    .filter(|span| span.label == EntityLabel::Person)
    .filter_map(|span| {
      let name = span.text.trim();
      if !stop_list.accepts(name) {
        trace!("Rejecting generic person candidate {:?}", span.text);
        return None;
      }
      seen.insert(name.to_string()).then(|| PersonReference {
        name:        name.to_string(),
        page_number: document.find_page(name),
      })
    })
    .collect();
  debug!("Found {} persons", persons.len());
  persons
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Returns a fixed list of spans regardless of input.
  struct StubTagger(Vec<(&'static str, EntityLabel)>);

  impl EntityTagger for StubTagger {
    fn tag(&self, _text: &str) -> Vec<EntitySpan> {
      self.0.iter().map(|(text, label)| EntitySpan::new(*text, label.clone(), 0)).collect()
    }
  }

  fn document() -> ParsedDocument {
    let word = |text: &str| Word::new(text, BoundingBox::new(0.0, 0.0, 1.0, 1.0));
    ParsedDocument::assemble(vec![
      Ok(PageLayout::new(1).with_word(word("Preamble"))),
      Ok(PageLayout::new(2).with_word(word("Smith"))),
    ])
    .unwrap()
  }

  #[test]
  fn test_stop_list_and_labels() {
    let tagger = StubTagger(vec![
      ("Contractor", EntityLabel::Person),
      ("Acme Ltd", EntityLabel::Organization),
      ("   ", EntityLabel::Person),
      ("Smith", EntityLabel::Person),
    ]);
    let persons = extract_persons("", &tagger, &StopList::default(), &document());
    assert_eq!(persons, vec![PersonReference { name: "Smith".into(), page_number: Some(2) }]);
  }

  #[test]
  fn test_dedup_after_trim_keeps_first() {
    let tagger = StubTagger(vec![
      (" John Smith", EntityLabel::Person),
      ("Smith", EntityLabel::Person),
      ("John Smith ", EntityLabel::Person),
      ("john smith", EntityLabel::Person),
    ]);
    let persons = extract_persons("", &tagger, &StopList::default(), &document());
    let names: Vec<&str> = persons.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["John Smith", "Smith", "john smith"]);
    assert_eq!(persons[0].page_number, None);
    assert_eq!(persons[1].page_number, Some(2));
  }

  #[test]
  fn test_with_gazetteer() {
    let tagger = GazetteerTagger::new(["Smith"]);
    let persons = extract_persons("Smith and Smith", &tagger, &StopList::default(), &document());
    assert_eq!(persons.len(), 1);
  }

  #[test]
  fn test_serialized_sentinel() {
    let person = PersonReference { name: "Jane Roe".into(), page_number: None };
    assert_eq!(serde_json::to_string(&person).unwrap(), r#"{"name":"Jane Roe","page_number":-1}"#);
  }
}
