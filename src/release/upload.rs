//! Upload step: run the storage client and capture the storage key
//!
//! The storage client prints progress lines and ends with the key. The key is the
//! last non-empty line it printed, with quotes escaped and newlines removed, and
//! must be a `{...}` token.

use crate::core::error::{KeyError, PublisherError, PublisherResult, Stage, ToolFailure};
use crate::core::invocation::Invocation;
use crate::process::ToolRunner;
use crate::ui::Reporter;
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Storage client subcommand that uploads a directory
pub const UPLOAD_SUBCOMMAND: &str = "UploadDirectory";

/// Arguments for the storage client
pub fn upload_args(product_dir: &str) -> Vec<String> {
  vec![UPLOAD_SUBCOMMAND.to_string(), format!("-dir={}", product_dir)]
}

/// Last line with any content, or an empty string when there is none
pub fn last_non_empty_line(lines: &[String]) -> String {
  lines
    .iter()
    .rev()
    .find(|line| !line.is_empty())
    .cloned()
    .unwrap_or_default()
}

/// Escape `"` with a backslash and drop newline characters
pub fn sanitize_key(raw: &str) -> String {
  let mut key = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '"' => key.push_str("\\\""),
      '\n' | '\r' => {}
      c => key.push(c),
    }
  }
  key
}

/// Opaque bracketed key referencing an uploaded artifact set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String);

impl StorageKey {
  /// Validate an already sanitized key
  pub fn parse(sanitized: &str) -> Result<Self, KeyError> {
    if sanitized.is_empty() {
      return Err(KeyError::Empty);
    }
    if !(sanitized.starts_with('{') && sanitized.ends_with('}')) {
      return Err(KeyError::NotBracketed {
        candidate: sanitized.to_string(),
      });
    }
    Ok(Self(sanitized.to_string()))
  }

  /// Extract the key from the storage client's output lines
  pub fn from_output(lines: &[String]) -> Result<Self, KeyError> {
    Self::parse(&sanitize_key(&last_non_empty_line(lines)))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for StorageKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Runs the storage client for one invocation
pub struct UploadStep<'a> {
  invocation: &'a Invocation,
  strict_exit_status: bool,
}

impl<'a> UploadStep<'a> {
  pub fn new(invocation: &'a Invocation, strict_exit_status: bool) -> Self {
    Self {
      invocation,
      strict_exit_status,
    }
  }

  pub fn args(&self) -> Vec<String> {
    upload_args(&self.invocation.product_dir)
  }

  /// Upload the product directory and return the storage key
  pub fn run<R, W>(&self, runner: &mut R, reporter: &mut Reporter<W>) -> PublisherResult<StorageKey>
  where
    R: ToolRunner,
    W: Write,
  {
    let program = &self.invocation.storage_client;
    let output = runner.run(Stage::Upload, program, &self.args(), &mut |line| reporter.echo(line))?;

    if !output.succeeded() {
      if self.strict_exit_status {
        return Err(PublisherError::Tool {
          stage: Stage::Upload,
          program: program.clone(),
          reason: ToolFailure::ExitStatus(output.status),
        });
      }
      warn!(status = ?output.status, "storage client exited unsuccessfully; judging by output only");
    }

    let key = StorageKey::from_output(&output.lines)?;
    debug!(key = %key, lines = output.lines.len(), "storage key retrieved");
    Ok(key)
  }
}
