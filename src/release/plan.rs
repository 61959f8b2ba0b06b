//! Dry-run plan: the two tool invocations a run would make
//!
//! The storage key only exists after a real upload, so the publish command shows
//! a placeholder in its place. Passwords are always redacted.

use crate::core::invocation::Invocation;
use crate::release::publish::publish_args;
use crate::release::upload::upload_args;
use crate::utils::{redact_arg, render_command_line};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Shown in place of the storage key in a plan
pub const KEY_PLACEHOLDER: &str = "<storage-key>";

/// One planned tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
  pub program: PathBuf,
  pub args: Vec<String>,
}

impl PlannedCommand {
  fn new(program: &Path, args: Vec<String>) -> Self {
    Self {
      program: program.to_path_buf(),
      args: args.iter().map(|a| redact_arg(a)).collect(),
    }
  }

  pub fn command_line(&self) -> String {
    render_command_line(&self.program, &self.args)
  }
}

/// Upload then publish, as they would run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
  pub upload: PlannedCommand,
  pub publish: PlannedCommand,
}

impl PublishPlan {
  pub fn new(invocation: &Invocation) -> Self {
    Self {
      upload: PlannedCommand::new(&invocation.storage_client, upload_args(&invocation.product_dir)),
      publish: PlannedCommand::new(
        &invocation.publishing_client,
        publish_args(invocation, KEY_PLACEHOLDER),
      ),
    }
  }

  /// Human-readable rendering
  pub fn render(&self) -> String {
    let mut text = String::from("📦 Publish plan (dry run, nothing executed)\n\n");
    text.push_str("  1. Upload:\n");
    text.push_str(&format!("     {}\n", self.upload.command_line()));
    text.push_str("  2. Publish (key from step 1):\n");
    text.push_str(&format!("     {}\n", self.publish.command_line()));
    text
  }
}
