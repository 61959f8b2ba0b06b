//! Positional arguments of a publish run
//!
//! All nine values are opaque pass-throughs. Only their count is checked here;
//! a bad executable path or directory surfaces later when the tools run.

use crate::core::error::{PublisherError, PublisherResult};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;

/// Number of positional values a run requires
pub const ARG_COUNT: usize = 9;

/// Options that consume the following token as their value
const VALUE_OPTIONS: [&str; 2] = ["--config", "--level"];

/// Argument names and meanings, in positional order
const ARGUMENTS: [(&str, &str); ARG_COUNT] = [
  ("USERNAME", "Account name passed to the publishing client"),
  ("PASSWORD", "Account password passed to the publishing client"),
  ("ENV", "Target environment selector (e.g. Dev, Live)"),
  ("SYSTEM_TAG", "Deployment classification label (e.g. Development, Production)"),
  ("PRODUCT_TYPE", "Product type to publish"),
  ("PRODUCT_VERSION", "Product version to publish"),
  ("PRODUCT_DIR", "Directory holding the built product to upload"),
  ("STORAGE_CLIENT", "Path to the storage client executable"),
  ("PUBLISHING_CLIENT", "Path to the publishing client executable"),
];

/// The nine values a run is driven by
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
  pub username: String,
  pub password: String,
  pub environment: String,
  pub system_tag: String,
  pub product_type: String,
  pub product_version: String,
  pub product_dir: String,
  pub storage_client: PathBuf,
  pub publishing_client: PathBuf,
}

impl Invocation {
  /// Build from the raw positional arguments (program name excluded)
  pub fn from_args(args: &[String]) -> PublisherResult<Self> {
    let [
      username,
      password,
      environment,
      system_tag,
      product_type,
      product_version,
      product_dir,
      storage_client,
      publishing_client,
    ] = args
    else {
      return Err(PublisherError::Usage { given: args.len() });
    };

    Ok(Self {
      username: username.clone(),
      password: password.clone(),
      environment: environment.clone(),
      system_tag: system_tag.clone(),
      product_type: product_type.clone(),
      product_version: product_version.clone(),
      product_dir: product_dir.clone(),
      storage_client: PathBuf::from(storage_client),
      publishing_client: PathBuf::from(publishing_client),
    })
  }

  /// Usage text describing every positional argument
  pub fn usage(program: &str) -> String {
    let names: Vec<&str> = ARGUMENTS.iter().map(|(name, _)| *name).collect();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

    let mut text = format!("Usage: {} [OPTIONS] {}\n\n", program, names.join(" "));
    text.push_str("Uploads PRODUCT_DIR with the storage client, then publishes it with the publishing client.\n\n");
    text.push_str("Arguments:\n");
    for (name, meaning) in ARGUMENTS {
      text.push_str(&format!("  {:width$}  {}\n", name, meaning, width = width));
    }
    text.push_str(&format!(
      "\nAll {} arguments are required and are passed through verbatim, even when they start with `-`.\n",
      ARG_COUNT
    ));
    text.push_str("Options go before the arguments; `--` ends the options. Run with --help for options.");
    text
  }
}

/// Fence the positional values off from option parsing
///
/// Walks the leading tokens (program name excluded). Once exactly nine tokens
/// remain, those are the positional values whatever they look like. Before that,
/// `--` ends the options, a token starting with `-` is an option (`--config` and
/// `--level` also take the next token), and anything else starts the positional
/// values. The result has a `--` inserted before the positional values so the
/// command-line parser never reads them as options.
pub fn separate_positionals(raw: Vec<OsString>) -> Vec<OsString> {
  let mut options = Vec::new();
  let mut rest = raw.into_iter().peekable();

  while rest.len() != ARG_COUNT {
    let Some(token) = rest.peek() else {
      break;
    };
    if token == OsStr::new("--") {
      rest.next();
      break;
    }
    let Some(text) = token.to_str() else {
      break;
    };
    if !text.starts_with('-') {
      break;
    }

    let takes_value = VALUE_OPTIONS.contains(&text);
    options.extend(rest.next());
    if takes_value {
      options.extend(rest.next());
    }
  }

  options.push(OsString::from("--"));
  options.extend(rest);
  options
}

impl fmt::Debug for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Invocation")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("environment", &self.environment)
      .field("system_tag", &self.system_tag)
      .field("product_type", &self.product_type)
      .field("product_version", &self.product_version)
      .field("product_dir", &self.product_dir)
      .field("storage_client", &self.storage_client)
      .field("publishing_client", &self.publishing_client)
      .finish()
  }
}

#[cfg(test)]
pub(crate) fn sample_args() -> Vec<String> {
  [
    "builder",
    "s3cret",
    "Dev",
    "Development",
    "Studio",
    "1.2.3",
    "/build/out",
    "/tools/storage-client",
    "/tools/publishing-client",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}
