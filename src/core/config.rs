use crate::core::error::{ConfigError, PublisherResult};
use crate::core::outcome::ExitCodeStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for product-publisher
/// Searched in order: publisher.toml, .publisher.toml, .config/publisher.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherConfig {
  /// Echo every line the external tools print (default: true)
  #[serde(default = "default_echo_output")]
  pub echo_output: bool,

  /// Exit code convention for failures (default: conventional)
  #[serde(default)]
  pub exit_code_style: ExitCodeStyle,

  /// Fail a stage when its tool exits non-zero, even if its output looked fine (default: false)
  #[serde(default)]
  pub strict_exit_status: bool,
}

fn default_echo_output() -> bool {
  true
}

impl Default for PublisherConfig {
  fn default() -> Self {
    Self {
      echo_output: default_echo_output(),
      exit_code_style: ExitCodeStyle::default(),
      strict_exit_status: false,
    }
  }
}

impl PublisherConfig {
  /// Find config file in search order: publisher.toml, .publisher.toml, .config/publisher.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("publisher.toml"),
      path.join(".publisher.toml"),
      path.join(".config").join("publisher.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from an explicit file, or search `dir`; defaults when nothing is found
  pub fn resolve(explicit: Option<&Path>, dir: &Path) -> PublisherResult<(Self, Option<PathBuf>)> {
    let path = match explicit {
      Some(path) if !path.exists() => {
        return Err(
          ConfigError::NotFound {
            path: path.to_path_buf(),
          }
          .into(),
        );
      }
      Some(path) => Some(path.to_path_buf()),
      None => Self::find_config_path(dir),
    };

    match path {
      Some(path) => Ok((Self::load(&path)?, Some(path))),
      None => Ok((Self::default(), None)),
    }
  }

  /// Load config from a specific file
  pub fn load(config_path: &Path) -> PublisherResult<Self> {
    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
      path: config_path.to_path_buf(),
      source,
    })?;

    Self::parse(&content).map_err(|message| {
      ConfigError::Parse {
        path: config_path.to_path_buf(),
        message,
      }
      .into()
    })
  }

  fn parse(content: &str) -> Result<Self, String> {
    toml_edit::de::from_str(content).map_err(|e| e.to_string())
  }
}
