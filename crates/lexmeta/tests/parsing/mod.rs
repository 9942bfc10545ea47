use super::*;

#[test]
fn test_words_become_paragraphs_per_page() -> TestResult<()> {
  let parser = PdfParser::from_bytes(&contract_pdf())?;
  assert_eq!(parser.page_count(), 3);

  let document = ParsedDocument::from_parser(&parser)?;
  let first_page: Vec<&str> = document
    .content
    .iter()
    .filter(|e| e.page_number() == 1 && matches!(e, ContentElement::Paragraph { .. }))
    .map(ContentElement::text)
    .collect();
  assert_eq!(first_page[..3], ["SERVICES", "AGREEMENT", "Signed"]);
  assert!(first_page.contains(&"4.2"));

  let pages: Vec<u32> = document.content.iter().map(ContentElement::page_number).collect();
  assert!(pages.windows(2).all(|w| w[0] <= w[1]), "content must be page ordered");
  assert_eq!(document.page_count(), 3);
  Ok(())
}

#[test]
fn test_one_figure_per_page() -> TestResult<()> {
  let document = ParsedDocument::from_parser(&PdfParser::from_bytes(&contract_pdf())?)?;
  let figures: Vec<(&str, &str)> = document
    .content
    .iter()
    .filter_map(|e| match e {
      ContentElement::Figure { image_filename, caption, .. } =>
        Some((image_filename.as_str(), caption.as_str())),
      _ => None,
    })
    .collect();

  assert_eq!(figures.len(), 3);
  assert_eq!(figures[0].0, "page_1.png");
  assert!(figures[0].1.starts_with("Figure 1: Site plan"), "caption was {:?}", figures[0].1);
  assert_eq!(figures[1], ("page_2.png", ""));
  assert_eq!(figures[2].0, "page_3.png");

  // Each page ends with its figure marker.
  assert!(matches!(document.content.last(), Some(ContentElement::Figure { page_number: 3, .. })));
  Ok(())
}

#[test]
fn test_word_boxes_are_top_left_origin() -> TestResult<()> {
  let parser = PdfParser::from_bytes(&build_pdf(&[&["Hello world"]]))?;
  let page = parser.page(1)?;
  assert_eq!(page.words.len(), 2);
  let hello = page.words[0].bbox;
  assert_eq!((hello.x0, hello.top, hello.bottom), (72.0, 60.0, 72.0));
  assert!(page.words[1].bbox.x0 > hello.x1);
  Ok(())
}

#[test]
fn test_page_resolution_on_real_pages() -> TestResult<()> {
  let document = ParsedDocument::from_parser(&PdfParser::from_bytes(&contract_pdf())?)?;
  assert_eq!(document.find_page("XYZ-123"), Some(3));
  assert_eq!(document.find_page("SERVICES"), Some(1));
  assert_eq!(document.find_page("Article 5"), None);
  Ok(())
}

#[test]
fn test_zero_page_document() -> TestResult<()> {
  let parser = PdfParser::from_bytes(&build_pdf(&[]))?;
  assert_eq!(parser.page_count(), 0);
  let document = ParsedDocument::from_parser(&parser)?;
  assert!(document.content.is_empty());

  let metadata = LegalMetadata::extract(&document, "empty.pdf", &GazetteerTagger::default(), &Config::default());
  assert_eq!(metadata.document_date, DocumentDate::NotFound);
  assert!(metadata.dates.is_empty());
  assert!(metadata.references.persons.is_empty());
  assert!(metadata.references.letters_mentioned.is_empty());
  assert!(metadata.references.laws_clauses_articles_acts.is_empty());
  Ok(())
}
