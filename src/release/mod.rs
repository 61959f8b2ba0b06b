//! Release orchestration: upload the product, then publish it
//!
//! # Flow
//!
//! 1. **Upload**: the storage client receives `UploadDirectory -dir=<product_dir>`.
//!    Its last non-empty output line is the storage key.
//! 2. **Key check**: the sanitized key must be a `{...}` token, otherwise the run
//!    stops and nothing is published.
//! 3. **Publish**: the publishing client receives `-POST` plus credentials,
//!    environment, product metadata, the key and the system tag. Any non-empty
//!    output line means the publish failed.
//!
//! Both steps block until their tool closes its output. There are no retries and
//! no timeouts; a hung tool hangs the run. Running twice uploads and publishes
//! twice.

pub mod plan;
pub mod publish;
pub mod upload;

pub use plan::PublishPlan;
pub use publish::{PublishPolicy, PublishStep, SilentSuccess};
pub use upload::{StorageKey, UploadStep};

use crate::core::config::PublisherConfig;
use crate::core::error::PublisherResult;
use crate::core::invocation::Invocation;
use crate::process::ToolRunner;
use crate::ui::{Reporter, report};
use std::io::Write;
use tracing::info;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
  pub storage_key: StorageKey,
}

/// Runs the upload and publish steps in sequence
pub struct Publisher<R: ToolRunner, P: PublishPolicy, W: Write> {
  runner: R,
  policy: P,
  reporter: Reporter<W>,
  strict_exit_status: bool,
}

impl<R: ToolRunner, P: PublishPolicy, W: Write> Publisher<R, P, W> {
  pub fn new(runner: R, policy: P, out: W, config: &PublisherConfig) -> Self {
    Self {
      runner,
      policy,
      reporter: Reporter::new(out, config.echo_output),
      strict_exit_status: config.strict_exit_status,
    }
  }

  /// Upload and publish, reporting progress along the way
  ///
  /// Prints `Operation failed` for any failure before returning it.
  pub fn run(&mut self, invocation: &Invocation) -> PublisherResult<PublishReport> {
    let result = self.upload_and_publish(invocation);
    if result.is_err() {
      self.reporter.status(report::OPERATION_FAILED);
    }
    result
  }

  /// Any upload failure means no key, so it is reported as a key failure
  fn upload_and_publish(&mut self, invocation: &Invocation) -> PublisherResult<PublishReport> {
    self.reporter.status(report::UPLOADING);
    let upload = UploadStep::new(invocation, self.strict_exit_status);
    let storage_key = match upload.run(&mut self.runner, &mut self.reporter) {
      Ok(key) => key,
      Err(e) => {
        self.reporter.status(report::KEY_FAILED);
        return Err(e);
      }
    };
    self.reporter.status(report::UPLOADED);
    info!(product_dir = %invocation.product_dir, "artifacts uploaded");

    self.reporter.status(report::PUBLISHING);
    let publish = PublishStep::new(invocation, &self.policy, self.strict_exit_status);
    if let Err(e) = publish.run(&storage_key, &mut self.runner, &mut self.reporter) {
      self.reporter.status(report::PUBLISH_FAILED);
      return Err(e);
    }
    self.reporter.status(report::PUBLISHED);
    info!(
      product_type = %invocation.product_type,
      product_version = %invocation.product_version,
      environment = %invocation.environment,
      "product published"
    );

    Ok(PublishReport { storage_key })
  }

  #[cfg(test)]
  pub(crate) fn into_output(self) -> W {
    self.reporter.into_inner()
  }

  #[cfg(test)]
  pub(crate) fn runner(&self) -> &R {
    &self.runner
  }
}
