//! Run outcomes and their process exit codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// How failures are reported to the calling build system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitCodeStyle {
  /// Failures exit with 1
  #[default]
  Conventional,
  /// Failures exit with -1 (the host decides how that wraps, 255 on Unix)
  Legacy,
}

/// Tagged result of a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Success,
  UsageError,
  KeyRetrievalError,
  PublishError,
}

impl Outcome {
  pub fn is_success(self) -> bool {
    matches!(self, Outcome::Success)
  }

  /// Map to a process exit code
  pub fn exit_code(self, style: ExitCodeStyle) -> i32 {
    match (self, style) {
      (Outcome::Success, _) => 0,
      (_, ExitCodeStyle::Conventional) => 1,
      (_, ExitCodeStyle::Legacy) => -1,
    }
  }
}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::Success => write!(f, "success"),
      Outcome::UsageError => write!(f, "usage error"),
      Outcome::KeyRetrievalError => write!(f, "key retrieval error"),
      Outcome::PublishError => write!(f, "publish error"),
    }
  }
}
