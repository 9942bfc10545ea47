//! Module for writing a [`lexmeta`] configuration file

use super::*;

/// Options for [`Commands::Init`]
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Directory the parsed and metadata artifacts are written to
  #[arg(long)]
  pub output_path: Option<PathBuf>,

  /// A name to always tag as a person (repeatable)
  #[arg(long)]
  pub gazetteer: Vec<String>,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  init_options: InitOptions,
) -> Result<()> {
  let InitOptions { output_path, gazetteer } = init_options;

  let config = match output_path {
    Some(output_path) => Config::default().with_output_path(&output_path),
    None => Config::default(),
  }
  .with_gazetteer(gazetteer);

  if config_path.exists()
    && !interaction.confirm(&format!(
      "A configuration already exists at {}, do you want to overwrite it?",
      config_path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info(
      "Keeping the existing configuration. Pass a different location using --config",
    ))?;
    return Ok(());
  }

  config.save(config_path)?;
  interaction.reply(ResponseContent::Success(&format!(
    "Created lexmeta configuration\nConfig path: {}\nOutput path: {}",
    config_path.display(),
    config.output_path.display(),
  )))
}
