//! Configuration for document processing.
//!
//! A [`Config`] is stored as TOML, by default at `<config dir>/lexmeta/config.toml`.
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock behaviour:
//!
//! ```toml
//! output_path = "/home/me/.local/share/lexmeta/generated"
//! context_window = 50
//! stop_list = ["Contractor", "Request", "Works", "Milestones", "no.", "Name", "Company"]
//!
//! [tagger]
//! gazetteer = ["John Smith"]
//! honorifics = true
//! ```

use super::*;

/// Names that entity tagging and letter matching commonly misreport in contracts.
pub const DEFAULT_STOP_LIST: [&str; 7] =
  ["Contractor", "Request", "Works", "Milestones", "no.", "Name", "Company"];

/// Characters of surrounding text kept on each side of a date match.
pub const DEFAULT_CONTEXT_WINDOW: usize = 50;

/// Processing configuration shared by the library and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory the parsed and metadata artifacts are written to
  pub output_path:    PathBuf,
  /// Characters of context captured on each side of a date
  pub context_window: usize,
  /// Candidate names that are never reported as persons or letter identifiers
  pub stop_list:      Vec<String>,
  /// How the process-wide entity tagger is assembled
  pub tagger:         TaggerConfig,
}

/// Settings for the entity tagger built at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
  /// Known person names, matched verbatim
  pub gazetteer:  Vec<String>,
  /// Whether to tag capitalised names that follow an honorific ("Mr.", "Dr", ...)
  pub honorifics: bool,
}

impl Default for TaggerConfig {
  fn default() -> Self { Self { gazetteer: Vec::new(), honorifics: true } }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_path:    Self::default_output_path(),
      context_window: DEFAULT_CONTEXT_WINDOW,
      stop_list:      DEFAULT_STOP_LIST.iter().map(|s| s.to_string()).collect(),
      tagger:         TaggerConfig::default(),
    }
  }
}

impl Config {
  /// Default location of the configuration file.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("lexmeta").join("config.toml")
  }

  /// Default artifact directory, under the platform data directory.
  pub fn default_output_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("lexmeta").join("generated")
  }

  /// Reads a configuration from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
  }

  /// Reads the configuration at `path`, or the defaults if the file does not exist.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No config at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Writes this configuration as TOML, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the directory both artifacts are written to.
  pub fn with_output_path(mut self, output_path: &Path) -> Self {
    self.output_path = output_path.to_path_buf();
    self
  }

  /// Sets how many characters of context surround each date.
  pub fn with_context_window(mut self, context_window: usize) -> Self {
    self.context_window = context_window;
    self
  }

  /// Replaces the person stop-list.
  pub fn with_stop_list<I, S>(mut self, stop_list: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.stop_list = stop_list.into_iter().map(Into::into).collect();
    self
  }

  /// Replaces the names the gazetteer tagger recognizes.
  pub fn with_gazetteer<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.tagger.gazetteer = names.into_iter().map(Into::into).collect();
    self
  }

  /// The stop-list as a lookup set.
  pub fn stop_list(&self) -> StopList { StopList::new(self.stop_list.iter().cloned()) }
}
