//! Publish command implementation

use crate::core::config::PublisherConfig;
use crate::core::error::{PublisherResult, ResultExt};
use crate::core::invocation::Invocation;
use crate::process::SystemRunner;
use crate::release::{PublishPlan, Publisher, SilentSuccess};
use std::io;
use tracing::info;

/// Options for one publish command
#[derive(Debug, Default)]
pub struct PublishOptions {
  /// Print the planned tool invocations instead of running them
  pub dry_run: bool,
  /// Print the dry-run plan as JSON
  pub json: bool,
  /// The raw positional arguments
  pub args: Vec<String>,
}

/// Run the publish command
pub fn run_publish(program: &str, config: &PublisherConfig, options: &PublishOptions) -> PublisherResult<()> {
  let invocation = match Invocation::from_args(&options.args) {
    Ok(invocation) => invocation,
    Err(e) => {
      println!("{}", Invocation::usage(program));
      return Err(e);
    }
  };

  if options.dry_run {
    let plan = PublishPlan::new(&invocation);
    if options.json {
      let json = serde_json::to_string_pretty(&plan).context("Failed to serialize the publish plan")?;
      println!("{}", json);
    } else {
      print!("{}", plan.render());
    }
    return Ok(());
  }

  let mut publisher = Publisher::new(SystemRunner::new(), SilentSuccess, io::stdout(), config);
  let report = publisher.run(&invocation)?;
  info!(storage_key = %report.storage_key, "release complete");

  Ok(())
}
