use std::{
  fs,
  path::{Path, PathBuf},
};

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SidenavError;

// I know this looks silly, but my understanding is that this is the most
// type-correct and re-usable way. Functions allow for more complex default
// values that can't be expressed as literals.
fn default_docs_dir() -> PathBuf {
  PathBuf::from("docs")
}

fn default_home_title() -> String {
  "Home".to_string()
}

fn default_index_file() -> String {
  "README.md".to_string()
}

fn default_reserved_dir() -> String {
  ".vuepress".to_string()
}

/// Configuration options for sidebar composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Documentation root containing nested markdown directories
  #[serde(default = "default_docs_dir")]
  pub docs_dir: PathBuf,

  /// Site configuration source textually scanned for a base-path declaration
  #[serde(default)]
  pub site_config: Option<PathBuf>,

  /// Display title of the fixed Home entry
  #[serde(default = "default_home_title")]
  pub home_title: String,

  /// File name marking a directory as having a landing page
  #[serde(default = "default_index_file")]
  pub index_file: String,

  /// Tooling-reserved directory excluded from the walk
  #[serde(default = "default_reserved_dir")]
  pub reserved_dir: String,

  /// Resolved base path. Computed once at load time by scanning
  /// `site_config`, never read from the configuration file itself, and passed
  /// down to every composition.
  #[serde(skip)]
  pub base: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      docs_dir:     default_docs_dir(),
      site_config:  None,
      home_title:   default_home_title(),
      index_file:   default_index_file(),
      reserved_dir: default_reserved_dir(),
      base:         None,
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has no recognized
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SidenavError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let ext = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match ext.as_deref() {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      Some(other) => {
        Err(SidenavError::Config(format!(
          "Unsupported config file format '{other}': {}",
          path.display()
        )))
      },
      None => {
        Err(SidenavError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from an optional file path, falling back to defaults,
  /// then resolve the base path once for the lifetime of this configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the config file itself cannot be read or parsed.
  /// Base-path resolution is best-effort and never fails the load.
  pub fn load(path: Option<&Path>) -> Result<Self, SidenavError> {
    let mut config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };

    config.base = match config.site_config.as_deref() {
      Some(source) => resolve_base(source),
      None => {
        warn!("no site configuration source given; base path defaults to /");
        None
      },
    };

    Ok(config)
  }
}

/// Scan a site configuration source for a base-path declaration such as
/// `base: '/my-base/'`. The key may be bare or quoted, the value single- or
/// double-quoted.
///
/// This lookup is best-effort: a missing or unreadable file, or a source with
/// no declaration, logs a warning and yields `None`.
fn resolve_base(source: &Path) -> Option<String> {
  let base = fs::read_to_string(source).ok().and_then(|contents| {
    let re = Regex::new(r#"["']?base["']?\s*:\s*["']([^"']+)["']"#).ok()?;
    re.captures(&contents)
      .and_then(|caps| caps.get(1))
      .map(|m| m.as_str().to_string())
  });

  match base {
    Some(base) => {
      debug!("resolved base path '{base}' from {}", source.display());
      Some(base)
    },
    None => {
      warn!("base option not found in {}", source.display());
      None
    },
  }
}
