use std::thread;

use super::*;

fn contract_on_disk() -> TestResult<(tempfile::TempDir, std::path::PathBuf)> {
  let dir = tempdir()?;
  let path = dir.path().join("services agreement.pdf");
  std::fs::write(&path, contract_pdf())?;
  Ok((dir, path))
}

fn lexmeta_for(output: &std::path::Path) -> Lexmeta {
  Lexmeta::builder()
    .with_config(Config::default().with_output_path(output))
    .with_tagger(gazetteer(&["John Smith", "Contractor"]))
    .build()
}

#[test]
fn test_process_writes_both_artifacts() -> TestResult<()> {
  let (dir, path) = contract_on_disk()?;
  let output = dir.path().join("generated");
  let artifacts = lexmeta_for(&output).process(&path)?;

  assert_eq!(artifacts.parsed_path, output.join("services agreement_parsed.json"));
  assert_eq!(artifacts.metadata_path, output.join("services agreement_metadata.json"));

  let metadata = LegalMetadata::from_json(&std::fs::read_to_string(&artifacts.metadata_path)?)?;
  assert_eq!(metadata, artifacts.metadata);
  assert_eq!(metadata.document_name, "services agreement.pdf");

  let parsed = ParsedDocument::from_json(&std::fs::read_to_string(&artifacts.parsed_path)?)?;
  assert_eq!(parsed, lexmeta_for(&output).parse(&path)?);
  Ok(())
}

#[test]
fn test_metadata_from_contract() -> TestResult<()> {
  let (dir, path) = contract_on_disk()?;
  let metadata = lexmeta_for(dir.path()).process(&path)?.metadata;

  assert_eq!(metadata.document_date.to_string(), "2022-01-01");
  let dates: Vec<String> = metadata.dates.iter().map(|d| d.date.to_string()).collect();
  assert_eq!(dates, vec!["2022-01-01", "2023-03-15"]);

  let clauses: Vec<&str> =
    metadata.references.laws_clauses_articles_acts.iter().map(|c| c.reference.as_str()).collect();
  assert_eq!(clauses, vec!["Clause 4.2", "Article 5"]);

  let letters = &metadata.references.letters_mentioned;
  assert_eq!(letters.len(), 2);
  assert!(letters.iter().all(|l| l.name == "XYZ-123" && l.page_number == Some(3)));

  let persons = &metadata.references.persons;
  assert_eq!(persons.len(), 1);
  assert_eq!(persons[0].name, "John Smith");
  // Words are single elements, so a two-word name is never found verbatim.
  assert_eq!(persons[0].page_number, None);
  Ok(())
}

#[test]
fn test_parallel_documents_share_tagger() -> TestResult<()> {
  let (dir, path) = contract_on_disk()?;
  let lexmeta = lexmeta_for(dir.path());
  let expected = lexmeta.extract(&lexmeta.parse(&path)?, "services agreement.pdf");

  let results: Vec<LegalMetadata> = thread::scope(|scope| {
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let lexmeta = lexmeta.clone();
        let path = path.clone();
        scope.spawn(move || {
          let document = lexmeta.parse(&path).unwrap();
          lexmeta.extract(&document, "services agreement.pdf")
        })
      })
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });

  assert!(results.iter().all(|m| *m == expected));
  Ok(())
}

#[test]
fn test_rejected_upload_is_client_error() {
  let dir = tempdir().unwrap();
  let result = lexmeta_for(dir.path()).process(dir.path().join("nothing.pdf"));
  match result {
    Err(LexmetaError::InvalidRequest(message)) => assert!(message.contains("does not exist")),
    other => panic!("Expected InvalidRequest, got {other:?}"),
  }
}
