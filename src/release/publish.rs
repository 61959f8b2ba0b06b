//! Publish step: hand the storage key and product metadata to the publishing client

use crate::core::error::{PublisherError, PublisherResult, Stage, ToolFailure};
use crate::core::invocation::Invocation;
use crate::process::ToolRunner;
use crate::release::upload::StorageKey;
use crate::ui::Reporter;
use std::io::Write;
use tracing::{debug, warn};

/// Arguments for the publishing client, in the order it expects them
pub fn publish_args(invocation: &Invocation, key: &str) -> Vec<String> {
  vec![
    "-POST".to_string(),
    format!("-u={}", invocation.username),
    format!("-p={}", invocation.password),
    format!("-env={}", invocation.environment),
    format!("-ProductType={}", invocation.product_type),
    format!("-ProductVersion={}", invocation.product_version),
    format!("-key={}", key),
    format!("-SystemTag={}", invocation.system_tag),
  ]
}

/// Decides from the publishing client's output whether publishing worked
pub trait PublishPolicy {
  fn did_publish_succeed(&self, output_lines: &[String]) -> bool;
}

/// The publishing client prints nothing on success; any content is a failure
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSuccess;

impl PublishPolicy for SilentSuccess {
  fn did_publish_succeed(&self, output_lines: &[String]) -> bool {
    output_lines.iter().all(|line| line.is_empty())
  }
}

/// Runs the publishing client for one invocation
pub struct PublishStep<'a, P: PublishPolicy> {
  invocation: &'a Invocation,
  policy: &'a P,
  strict_exit_status: bool,
}

impl<'a, P: PublishPolicy> PublishStep<'a, P> {
  pub fn new(invocation: &'a Invocation, policy: &'a P, strict_exit_status: bool) -> Self {
    Self {
      invocation,
      policy,
      strict_exit_status,
    }
  }

  /// Publish the product under `key`
  pub fn run<R, W>(&self, key: &StorageKey, runner: &mut R, reporter: &mut Reporter<W>) -> PublisherResult<()>
  where
    R: ToolRunner,
    W: Write,
  {
    let program = &self.invocation.publishing_client;
    let args = publish_args(self.invocation, key.as_str());
    let output = runner.run(Stage::Publish, program, &args, &mut |line| reporter.echo(line))?;

    if !self.policy.did_publish_succeed(&output.lines) {
      let output: Vec<String> = output.lines.into_iter().filter(|line| !line.is_empty()).collect();
      debug!(lines = output.len(), "publishing client reported a problem");
      return Err(PublisherError::Publish { output });
    }

    if !output.succeeded() {
      if self.strict_exit_status {
        return Err(PublisherError::Tool {
          stage: Stage::Publish,
          program: program.clone(),
          reason: ToolFailure::ExitStatus(output.status),
        });
      }
      warn!(status = ?output.status, "publishing client exited unsuccessfully but printed nothing");
    }

    Ok(())
  }
}
