//! Module for reading back a metadata artifact.

use super::*;

/// Options for [`Commands::Inspect`]
#[derive(Args, Clone)]
pub struct InspectOptions {
  /// A `<stem>_metadata.json` artifact
  pub artifact: PathBuf,

  /// Print the record as JSON instead of a summary
  #[arg(long)]
  pub json: bool,
}

/// Function for the [`Commands::Inspect`] in the CLI.
pub async fn inspect<I: UserInteraction>(interaction: &I, inspect_options: InspectOptions) -> Result<()> {
  let InspectOptions { artifact, json } = inspect_options;
  let contents = tokio::fs::read_to_string(&artifact).await?;
  let metadata = LegalMetadata::from_json(&contents)?;
  debug!("Read metadata for {} from {}", metadata.document_name, artifact.display());

  if json {
    interaction.reply(ResponseContent::Raw(&metadata.to_json()?))
  } else {
    interaction.reply(ResponseContent::Metadata(&metadata))
  }
}
