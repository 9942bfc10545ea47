//! Module for running documents through the [`lexmeta`] pipeline.
//!
//! Every document runs as its own blocking task on the tokio runtime. All tasks
//! share one [`Lexmeta`] and therefore one tagger; a failing document is reported
//! and does not stop the others.

use glob::Pattern;

use super::*;

/// Options for [`Commands::Process`]
#[derive(Args, Clone)]
pub struct ProcessOptions {
  /// PDF files, or directories whose `*.pdf` files are all processed
  #[arg(required = true)]
  pub paths: Vec<PathBuf>,

  /// Overrides the configured output directory
  #[arg(long)]
  pub output_path: Option<PathBuf>,
}

/// Function for the [`Commands::Process`] in the CLI.
pub async fn process<I: UserInteraction>(
  interaction: &I,
  config: Config,
  process_options: ProcessOptions,
) -> Result<()> {
  let ProcessOptions { paths, output_path } = process_options;
  let config = match output_path {
    Some(output_path) => config.with_output_path(&output_path),
    None => config,
  };

  let documents = expand_paths(&paths)?;
  if documents.is_empty() {
    interaction.reply(ResponseContent::Info("No PDF documents found"))?;
    return Ok(());
  }
  interaction.reply(ResponseContent::Info(&format!("Processing {} document(s)", documents.len())))?;

  let lexmeta = Lexmeta::builder().with_config(config).build();
  let tasks: Vec<_> = documents
    .into_iter()
    .map(|path| {
      let lexmeta = lexmeta.clone();
      let task_path = path.clone();
      (path, tokio::task::spawn_blocking(move || lexmeta.process(task_path)))
    })
    .collect();

  let total = tasks.len();
  let mut failed = 0;
  for (path, task) in tasks {
    match task.await? {
      Ok(artifacts) => interaction.reply(ResponseContent::Artifacts(&artifacts))?,
      Err(e) => {
        failed += 1;
        warn!("Failed to process {}: {e:?}", path.display());
        interaction.reply(ResponseContent::Error(&format!("{}: {e}", path.display())))?;
      },
    }
  }

  if failed > 0 {
    return Err(LexmetadError::DocumentsFailed { failed, total });
  }
  interaction.reply(ResponseContent::Success(&format!("Processed {total} document(s)")))
}

/// Replaces each directory with the `*.pdf` files directly inside it, sorted.
///
/// Other paths are kept as given so that missing files surface as per-document
/// failures.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
  let mut documents = Vec::new();
  for path in paths {
    if !path.is_dir() {
      documents.push(path.clone());
      continue;
    }
    let pattern = format!("{}/*.pdf", Pattern::escape(&path.to_string_lossy()));
    trace!("Expanding {pattern}");
    let mut found: Vec<PathBuf> = glob::glob(&pattern)?
      .filter_map(|entry| match entry {
        Ok(path) => Some(path),
        Err(e) => {
          warn!("Skipping unreadable entry: {e}");
          None
        },
      })
      .collect();
    found.sort();
    documents.extend(found);
  }
  Ok(documents)
}
