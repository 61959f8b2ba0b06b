//! Error types for product-publisher with contextual messages
//!
//! Every failure the publisher can hit is categorized here. Each error maps to
//! exactly one [`Outcome`], which decides the process exit code at the boundary.

use crate::core::outcome::Outcome;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for product-publisher
#[derive(Debug)]
pub enum PublisherError {
  /// Wrong number of positional arguments
  Usage { given: usize },

  /// The upload tool did not produce a usable storage key
  Key(KeyError),

  /// The publish tool printed something, which its contract treats as failure
  Publish { output: Vec<String> },

  /// An external tool could not be spawned or read, or exited non-zero in strict mode
  Tool { stage: Stage, program: PathBuf, reason: ToolFailure },

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

/// Which external tool an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Upload,
  Publish,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Upload => write!(f, "storage client"),
      Stage::Publish => write!(f, "publishing client"),
    }
  }
}

/// Why an external tool failed
#[derive(Debug)]
pub enum ToolFailure {
  /// Could not start the process
  Spawn(io::Error),
  /// Reading its output or waiting on it failed
  Stream(io::Error),
  /// Non-zero exit status (only reported in strict mode); `None` means killed by a signal
  ExitStatus(Option<i32>),
}

impl fmt::Display for ToolFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolFailure::Spawn(e) => write!(f, "failed to start: {}", e),
      ToolFailure::Stream(e) => write!(f, "failed to read output: {}", e),
      ToolFailure::ExitStatus(Some(code)) => write!(f, "exited with status {}", code),
      ToolFailure::ExitStatus(None) => write!(f, "terminated by a signal"),
    }
  }
}

impl PublisherError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PublisherError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PublisherError::Message { message, context, help } => PublisherError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      PublisherError::Io(e) => PublisherError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Tagged outcome this error resolves to
  pub fn outcome(&self) -> Outcome {
    match self {
      PublisherError::Usage { .. } | PublisherError::Config(_) => Outcome::UsageError,
      PublisherError::Key(_) => Outcome::KeyRetrievalError,
      PublisherError::Publish { .. } => Outcome::PublishError,
      PublisherError::Tool { stage: Stage::Upload, .. } => Outcome::KeyRetrievalError,
      PublisherError::Tool { stage: Stage::Publish, .. } => Outcome::PublishError,
      PublisherError::Io(_) | PublisherError::Message { .. } => Outcome::UsageError,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PublisherError::Key(e) => e.help_message(),
      PublisherError::Config(e) => e.help_message(),
      PublisherError::Tool { program, reason, .. } => match reason {
        ToolFailure::Spawn(_) => Some(format!(
          "Check that {} exists and is executable.",
          program.display()
        )),
        ToolFailure::ExitStatus(_) => {
          Some("Set `strict_exit_status = false` to judge the tool by its output only.".to_string())
        }
        ToolFailure::Stream(_) => None,
      },
      PublisherError::Publish { .. } => {
        Some("The publishing client prints nothing on success; its output above describes the problem.".to_string())
      }
      PublisherError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for PublisherError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublisherError::Usage { given } => {
        write!(f, "Expected 9 arguments, got {}", given)
      }
      PublisherError::Key(e) => write!(f, "{}", e),
      PublisherError::Publish { output } => {
        write!(f, "Publishing client reported {} line(s) of output", output.len())?;
        if let Some(first) = output.first() {
          write!(f, "\nFirst line: {}", first)?;
        }
        Ok(())
      }
      PublisherError::Tool { stage, program, reason } => {
        write!(f, "The {} ({}) {}", stage, program.display(), reason)
      }
      PublisherError::Config(e) => write!(f, "{}", e),
      PublisherError::Io(e) => write!(f, "I/O error: {}", e),
      PublisherError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PublisherError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PublisherError::Io(e) => Some(e),
      PublisherError::Tool {
        reason: ToolFailure::Spawn(e) | ToolFailure::Stream(e),
        ..
      } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PublisherError {
  fn from(err: io::Error) -> Self {
    PublisherError::Io(err)
  }
}

impl From<String> for PublisherError {
  fn from(msg: String) -> Self {
    PublisherError::message(msg)
  }
}

impl From<&str> for PublisherError {
  fn from(msg: &str) -> Self {
    PublisherError::message(msg)
  }
}

impl From<KeyError> for PublisherError {
  fn from(err: KeyError) -> Self {
    PublisherError::Key(err)
  }
}

impl From<ConfigError> for PublisherError {
  fn from(err: ConfigError) -> Self {
    PublisherError::Config(err)
  }
}

impl From<serde_json::Error> for PublisherError {
  fn from(err: serde_json::Error) -> Self {
    PublisherError::message(format!("JSON error: {}", err))
  }
}

/// Storage key validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
  /// The upload tool printed no non-empty line
  Empty,

  /// The last non-empty line is not a `{...}` token
  NotBracketed { candidate: String },
}

impl KeyError {
  fn help_message(&self) -> Option<String> {
    match self {
      KeyError::Empty => Some("The storage client must print the storage key as its last non-empty line.".to_string()),
      KeyError::NotBracketed { .. } => {
        Some("A storage key starts with `{` and ends with `}`. Check the storage client output above.".to_string())
      }
    }
  }
}

impl fmt::Display for KeyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      KeyError::Empty => write!(f, "Storage client produced no output to read a key from"),
      KeyError::NotBracketed { candidate } => {
        write!(f, "Storage client output is not a storage key: {}", candidate)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// `--config` pointed at a file that does not exist
  NotFound { path: PathBuf },

  /// File could not be read
  Read { path: PathBuf, source: io::Error },

  /// File is not valid TOML or has unknown/mistyped keys
  Parse { path: PathBuf, message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit `--config` to search for publisher.toml in the working directory.".to_string())
      }
      ConfigError::Parse { .. } => Some(
        "Valid keys are `echo_output`, `exit_code_style` (\"conventional\" or \"legacy\") and `strict_exit_status`."
          .to_string(),
      ),
      ConfigError::Read { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Config file not found: {}", path.display())
      }
      ConfigError::Read { path, source } => {
        write!(f, "Failed to read config from {}: {}", path.display(), source)
      }
      ConfigError::Parse { path, message } => {
        write!(f, "Failed to parse config from {}:\n{}", path.display(), message)
      }
    }
  }
}

/// Result type alias for product-publisher
pub type PublisherResult<T> = Result<T, PublisherError>;

/// Attach context to any result whose error converts into [`PublisherError`]
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PublisherResult<T>;

  /// Add context built only when the result is an error
  fn with_context<F>(self, f: F) -> PublisherResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PublisherError>,
{
  fn context(self, ctx: impl Into<String>) -> PublisherResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PublisherResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PublisherError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
