use std::{
  fs,
  path::{Path, PathBuf},
};

use hugodoc_html::{DocumentInfo, EMPTY_FRONT_MATTER};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, error::ConfigError};

/// File names looked up in the working directory when no config file is
/// passed explicitly.
const CONFIG_FILENAMES: [&str; 4] = [
  "hugodoc.toml",
  "hugodoc.json",
  ".hugodoc.toml",
  ".hugodoc.json",
];

/// Configuration for hugodoc.
///
/// Loaded from TOML or JSON files, adjusted by `--config KEY=VALUE`
/// overrides and finally by command line flags. Every field has a default,
/// so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Each flag maps to one document attribute"
)]
pub struct Config {
  /// Directory the generated content is written to.
  pub output_dir: PathBuf,

  /// File holding the front matter of the top-level page.
  pub header: Option<PathBuf>,

  /// Split documents into one page per section.
  pub multipage: bool,

  /// Deepest section level that still gets its own page.
  pub multipage_level: usize,

  /// File holding the header template of generated pages.
  pub multipage_header: Option<PathBuf>,

  /// Prefix for links to generated pages.
  pub multipage_ref: String,

  /// Convert admonition icons to Font Awesome.
  pub font_awesome_icons: bool,

  /// Keep the preamble on the top-level page.
  pub keep_preamble: bool,

  /// Number of worker threads. All cores when unset.
  pub jobs: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:         PathBuf::from("build"),
      header:             None,
      multipage:          false,
      multipage_level:    1,
      multipage_header:   None,
      multipage_ref:      String::new(),
      font_awesome_icons: true,
      keep_preamble:      false,
      jobs:               None,
    }
  }
}

impl Config {
  /// Load configuration from a TOML or JSON file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if its
  /// extension is neither `toml` nor `json`.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);
    match extension.as_deref() {
      Some("json") => Ok(serde_json::from_str(&content)?),
      Some("toml") => Ok(toml::from_str(&content)?),
      _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
  }

  /// Load and merge the given config files in order, or the discovered one
  /// when none are given, then apply the `KEY=VALUE` overrides.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if config_files.is_empty() {
      match Self::find_config_file() {
        Some(discovered) => {
          info!("Using discovered config file: {}", discovered.display());
          Self::from_file(&discovered)?
        },
        None => Self::default(),
      }
    } else {
      let mut merged = Self::default();
      for path in config_files {
        merged.merge(Self::from_file(path)?);
      }
      if config_files.len() > 1 {
        info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    };

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Merge another config into this one, the other config taking
  /// precedence.
  ///
  /// [`Option`] fields are only replaced by a [`Some`] value; every other
  /// field is always replaced.
  pub fn merge(&mut self, other: Self) {
    let Self {
      output_dir,
      header,
      multipage,
      multipage_level,
      multipage_header,
      multipage_ref,
      font_awesome_icons,
      keep_preamble,
      jobs,
    } = other;

    self.output_dir = output_dir;
    self.multipage = multipage;
    self.multipage_level = multipage_level;
    self.multipage_ref = multipage_ref;
    self.font_awesome_icons = font_awesome_icons;
    self.keep_preamble = keep_preamble;
    if header.is_some() {
      self.header = header;
    }
    if multipage_header.is_some() {
      self.multipage_header = multipage_header;
    }
    if jobs.is_some() {
      self.jobs = jobs;
    }
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` format, names an
  /// unknown key, or carries a value of the wrong type.
  ///
  /// # Example
  ///
  /// ```rust
  /// use hugodoc::config::Config;
  ///
  /// let mut config = Config::default();
  /// config
  ///   .apply_overrides(&["multipage=yes".into(), "multipage_level=2".into()])
  ///   .unwrap();
  /// assert!(config.multipage);
  /// assert_eq!(config.multipage_level, 2);
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str
        .split_once('=')
        .ok_or_else(|| ConfigError::OverrideFormat(override_str.clone()))?;
      self.apply_override(key.trim(), value.trim())?;
    }
    Ok(())
  }

  /// Set a single field from its textual value. Empty values reset optional
  /// fields.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys and unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "output_dir" => self.output_dir = PathBuf::from(value),
      "header" => self.header = optional_path(value),
      "multipage" => self.multipage = parse_bool(key, value)?,
      "multipage_level" => self.multipage_level = parse_usize(key, value)?,
      "multipage_header" => self.multipage_header = optional_path(value),
      "multipage_ref" => self.multipage_ref = value.to_string(),
      "font_awesome_icons" => {
        self.font_awesome_icons = parse_bool(key, value)?;
      },
      "keep_preamble" => self.keep_preamble = parse_bool(key, value)?,
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(parse_usize(key, value)?)
        };
      },
      _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
  }

  /// Apply command line flags on top of the loaded configuration.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(ref output_dir) = cli.output_dir {
      self.output_dir.clone_from(output_dir);
    }
    if cli.multipage {
      self.multipage = true;
    }
    if let Some(level) = cli.multipage_level {
      self.multipage_level = level;
    }
    if let Some(ref multipage_ref) = cli.multipage_ref {
      self.multipage_ref.clone_from(multipage_ref);
    }
    if cli.multipage_header.is_some() {
      self.multipage_header.clone_from(&cli.multipage_header);
    }
    if cli.header.is_some() {
      self.header.clone_from(&cli.header);
    }
    if cli.no_font_awesome {
      self.font_awesome_icons = false;
    }
    if cli.keep_preamble {
      self.keep_preamble = true;
    }
    if cli.jobs.is_some() {
      self.jobs = cli.jobs;
    }
  }

  /// Check the values that cannot be expressed by the field types alone.
  ///
  /// # Errors
  ///
  /// Returns an error if `multipage_level` or `jobs` is zero.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.multipage_level == 0 {
      return Err(ConfigError::Config(
        "multipage_level must be at least 1".to_string(),
      ));
    }
    if self.jobs == Some(0) {
      return Err(ConfigError::Config("jobs must be at least 1".to_string()));
    }
    Ok(())
  }

  /// Search the working directory for a config file.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    Self::find_config_file_in(&current_dir)
  }

  /// Search `dir` for a config file.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Document settings shared by every input, with the header files read.
  ///
  /// A header file that cannot be read is reported and replaced by empty
  /// front matter.
  #[must_use]
  pub fn base_info(&self) -> DocumentInfo {
    DocumentInfo {
      document_name:      String::new(),
      header:             read_header(self.header.as_deref()),
      multipage:          self.multipage,
      multipage_level:    self.multipage_level,
      multipage_header:   read_header(self.multipage_header.as_deref()),
      multipage_ref:      self.multipage_ref.clone(),
      font_awesome_icons: self.font_awesome_icons,
      keep_preamble:      self.keep_preamble,
    }
  }

  /// Settings snapshot for the document named `document_name`.
  #[must_use]
  pub fn document_info(&self, document_name: &str) -> DocumentInfo {
    DocumentInfo {
      document_name: document_name.to_string(),
      ..self.base_info()
    }
  }
}

fn optional_path(value: &str) -> Option<PathBuf> {
  (!value.is_empty()).then(|| PathBuf::from(value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::InvalidValue {
        key:      key.to_string(),
        value:    value.to_string(),
        expected: "true/false, yes/no, or 1/0",
      })
    },
  }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::InvalidValue {
      key:      key.to_string(),
      value:    value.to_string(),
      expected: "a positive integer",
    }
  })
}

/// Contents of a header file, or empty front matter.
fn read_header(path: Option<&Path>) -> String {
  let Some(path) = path else {
    return EMPTY_FRONT_MATTER.to_string();
  };
  match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) => {
      warn!(
        "Failed to read header file {}: {e}. Using empty front matter",
        path.display()
      );
      EMPTY_FRONT_MATTER.to_string()
    },
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_merge_replaces_plain_fields() {
    let mut base = Config::default();
    base.multipage_ref = "/base/".into();

    let mut other = Config::default();
    other.multipage = true;
    other.multipage_level = 3;

    base.merge(other);

    assert!(base.multipage);
    assert_eq!(base.multipage_level, 3);
    assert_eq!(base.multipage_ref, "");
  }

  #[test]
  fn test_merge_keeps_options_unless_set() {
    let mut base = Config::default();
    base.header = Some(PathBuf::from("base.yaml"));
    base.jobs = Some(2);

    let mut other = Config::default();
    other.multipage_header = Some(PathBuf::from("page.yaml"));

    base.merge(other);

    assert_eq!(base.header, Some(PathBuf::from("base.yaml")));
    assert_eq!(base.multipage_header, Some(PathBuf::from("page.yaml")));
    assert_eq!(base.jobs, Some(2));
  }

  #[test]
  fn test_apply_overrides_typed_values() {
    let mut config = Config::default();

    config
      .apply_overrides(&[
        "multipage=true".into(),
        "multipage_level = 2".into(),
        "multipage_ref=/docs/".into(),
        "font_awesome_icons=no".into(),
        "jobs=4".into(),
        "output_dir=/tmp/site".into(),
      ])
      .unwrap();

    assert!(config.multipage);
    assert_eq!(config.multipage_level, 2);
    assert_eq!(config.multipage_ref, "/docs/");
    assert!(!config.font_awesome_icons);
    assert_eq!(config.jobs, Some(4));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
  }

  #[test]
  fn test_empty_override_resets_optional_fields() {
    let mut config = Config::default();
    config.header = Some(PathBuf::from("front.yaml"));
    config.jobs = Some(8);

    config
      .apply_overrides(&["header=".into(), "jobs=".into()])
      .unwrap();

    assert_eq!(config.header, None);
    assert_eq!(config.jobs, None);
  }

  #[test]
  fn test_override_errors() {
    let mut config = Config::default();

    let missing_equals = config.apply_overrides(&["multipage".into()]);
    assert!(
      missing_equals
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );

    let unknown = config.apply_overrides(&["title=x".into()]);
    assert!(
      unknown
        .unwrap_err()
        .to_string()
        .contains("Unknown configuration key")
    );

    let bad_bool = config.apply_overrides(&["keep_preamble=maybe".into()]);
    assert!(matches!(bad_bool, Err(ConfigError::InvalidValue { .. })));

    let bad_number = config.apply_overrides(&["multipage_level=two".into()]);
    assert!(
      bad_number
        .unwrap_err()
        .to_string()
        .contains("Expected a positive integer")
    );
  }

  #[test]
  fn test_validate_rejects_zero_level() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.multipage_level = 0;
    assert!(config.validate().is_err());

    config.multipage_level = 1;
    config.jobs = Some(0);
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_missing_header_file_falls_back() {
    let mut config = Config::default();
    config.header = Some(PathBuf::from("/nonexistent/hugodoc/header.yaml"));

    let info = config.document_info("guide");

    assert_eq!(info.document_name, "guide");
    assert_eq!(info.header, EMPTY_FRONT_MATTER);
    assert_eq!(info.multipage_header, EMPTY_FRONT_MATTER);
  }
}
