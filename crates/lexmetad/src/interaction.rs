//! Terminal output and prompts.

use console::{style, Emoji};
use dialoguer::Confirm;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for progress messages
pub static WORKING_PREFIX: &str = "» ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for user prompts
pub static PROMPT_PREFIX: &str = "❯ ";
/// Branch of a tree listing
pub static ITEM_PREFIX: &str = "├─";
/// Last branch of a tree listing
pub static LAST_ITEM_PREFIX: &str = "└─";
/// List bullet
pub static BULLET: &str = "•";
/// Points from a reference to its page
pub static ARROW: &str = "→";

/// Shown instead of a page number for references that were not located.
static NOT_LOCATED: &str = "not located";

/// Something a command wants to tell the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Artifacts written for one document
  Artifacts(&'a ProcessedArtifacts),
  /// A metadata record to summarize
  Metadata(&'a LegalMetadata),
  /// Text printed as is
  Raw(&'a str),
  /// A completed step
  Success(&'a str),
  /// A failure, printed to stderr
  Error(&'a str),
  /// Anything else worth mentioning
  Info(&'a str),
}

/// How commands talk to the user.
pub trait UserInteraction {
  /// Asks a yes/no question, defaulting to no.
  fn confirm(&self, message: &str) -> Result<bool>;
  /// Shows `content` to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

impl UserInteraction for Cli {
  fn confirm(&self, message: &str) -> Result<bool> {
    if self.accept_defaults {
      debug!("Accepting default for prompt: {message}");
      return Ok(true);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{} {}", style(PROMPT_PREFIX).cyan(), message))
        .default(false)
        .interact()?,
    )
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    match content {
      ResponseContent::Artifacts(artifacts) => print_artifacts(artifacts),
      ResponseContent::Metadata(metadata) => print_metadata(metadata),
      ResponseContent::Raw(text) => println!("{text}"),
      ResponseContent::Success(message) => println!("{} {}", style(SUCCESS_PREFIX).green(), message),
      ResponseContent::Error(message) => eprintln!("{} {}", style(ERROR_PREFIX).red(), style(message).red()),
      ResponseContent::Info(message) => println!("{} {}", style(INFO_PREFIX).blue(), message),
    }
    Ok(())
  }
}

/// Renders a resolved page for display.
fn page(page_number: Option<u32>) -> String {
  page_number.map_or_else(|| NOT_LOCATED.to_string(), |n| format!("page {n}"))
}

/// Lists the artifacts written for one document.
fn print_artifacts(artifacts: &ProcessedArtifacts) {
  let metadata = &artifacts.metadata;
  println!(
    "{} {} {}",
    style(SUCCESS_PREFIX).green(),
    style(&metadata.document_name).bold(),
    style(format!("(dated {})", metadata.document_date)).dim()
  );
  println!("   {} {}", style(ITEM_PREFIX).dim(), artifacts.parsed_path.display());
  println!("   {} {}", style(LAST_ITEM_PREFIX).dim(), artifacts.metadata_path.display());
}

/// Summarizes a metadata record, one section per reference kind.
fn print_metadata(metadata: &LegalMetadata) {
  let references = &metadata.references;
  println!("{} {}", Emoji("📄 ", WORKING_PREFIX), style(&metadata.document_name).bold().cyan());
  println!("   {} Document date: {}", style(BULLET).dim(), style(metadata.document_date).yellow());

  println!("   {} Dates ({}):", style(BULLET).dim(), metadata.dates.len());
  for date in &metadata.dates {
    println!("      {} {} {} {}", style(ITEM_PREFIX).dim(), date.date, style(ARROW).dim(), date.surrounding_context);
  }

  println!("   {} Letters ({}):", style(BULLET).dim(), references.letters_mentioned.len());
  for letter in &references.letters_mentioned {
    println!("      {} {} ({})", style(ITEM_PREFIX).dim(), letter.name, page(letter.page_number));
  }

  println!("   {} Clauses, articles and acts ({}):", style(BULLET).dim(), references.laws_clauses_articles_acts.len());
  for clause in &references.laws_clauses_articles_acts {
    println!("      {} {} ({})", style(ITEM_PREFIX).dim(), clause.reference, page(clause.page_number));
  }

  println!("   {} Persons ({}):", style(BULLET).dim(), references.persons.len());
  for person in &references.persons {
    println!("      {} {} ({})", style(ITEM_PREFIX).dim(), person.name, page(person.page_number));
  }
}
