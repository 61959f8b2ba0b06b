//! End-to-end upload and publish runs

use crate::helpers::{TestBench, run_publisher, stderr, stdout};
use anyhow::Result;

#[test]
fn test_successful_release() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "abc\n\n{STORAGEKEY123}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

  assert_eq!(
    stdout(&output),
    "Uploading artifacts...\nabc\n\n{STORAGEKEY123}\nArtifacts uploaded.\nPublishing the product...\nProduct published.\n"
  );

  let upload_args = bench.recorded_args("storage")?.expect("storage client should run");
  assert_eq!(
    upload_args,
    vec![
      "UploadDirectory".to_string(),
      format!("-dir={}", bench.product_dir.display()),
    ]
  );

  // The escaping backslashes reach the publishing client verbatim
  let publish_args = bench.recorded_args("publisher")?.expect("publishing client should run");
  assert_eq!(
    publish_args,
    vec![
      "-POST",
      "-u=builder",
      "-p=s3cret",
      "-env=Dev",
      "-ProductType=Studio",
      "-ProductVersion=1.2.3",
      "-key={STORAGEKEY123}",
      "-SystemTag=Development",
    ]
  );
  Ok(())
}

#[test]
fn test_blank_publish_output_is_success() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "\n\n", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(0));
  assert!(stdout(&output).ends_with("Product published.\n"));
  Ok(())
}

#[test]
fn test_invalid_key_aborts_before_publish() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "uploading...\nNOTAKEY\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("Failed to retrieve the storage key."));
  assert!(out.ends_with("Operation failed\n"));
  assert!(!out.contains("Publishing the product..."));
  assert!(stderr(&output).contains("NOTAKEY"));

  assert_eq!(bench.recorded_args("publisher")?, None);
  Ok(())
}

#[test]
fn test_publish_output_fails_release() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "\nError: invalid token\n\n", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("Error: invalid token"));
  assert!(!out.contains("Product published."));
  assert!(out.ends_with("Failed to publish the product.\nOperation failed\n"));
  Ok(())
}

#[test]
fn test_quotes_in_key_are_escaped() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY\"WITH\"QUOTES}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(0));

  // The escaping backslashes reach the publishing client verbatim
  let publish_args = bench.recorded_args("publisher")?.expect("publishing client should run");
  assert_eq!(publish_args[6], "-key={KEY\\\"WITH\\\"QUOTES}");
  Ok(())
}

#[test]
fn test_exit_status_ignored_unless_strict() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 3)?;
  let publisher = bench.tool("publisher", "", 0)?;
  let args = bench.args(&storage, &publisher);

  let output = run_publisher(&bench.path, &args)?;
  assert_eq!(output.status.code(), Some(0));

  bench.write_config("strict_exit_status = true\n")?;
  let output = run_publisher(&bench.path, &args)?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).ends_with("Failed to retrieve the storage key.\nOperation failed\n"));
  assert!(stderr(&output).contains("exited with status 3"));
  Ok(())
}

#[test]
fn test_missing_storage_client() -> Result<()> {
  let bench = TestBench::new()?;
  let publisher = bench.tool("publisher", "", 0)?;
  let missing = bench.path.join("no-such-storage-client");

  let output = run_publisher(&bench.path, &bench.args(&missing, &publisher))?;
  assert_eq!(output.status.code(), Some(1));
  assert_eq!(
    stdout(&output),
    "Uploading artifacts...\nFailed to retrieve the storage key.\nOperation failed\n"
  );
  assert!(stderr(&output).contains("no-such-storage-client"));
  assert_eq!(bench.recorded_args("publisher")?, None);
  Ok(())
}

#[test]
fn test_echo_can_be_disabled() -> Result<()> {
  let bench = TestBench::new()?;
  bench.write_config("echo_output = false\n")?;
  let storage = bench.tool("storage", "chatty progress\n{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(0));
  assert_eq!(
    stdout(&output),
    "Uploading artifacts...\nArtifacts uploaded.\nPublishing the product...\nProduct published.\n"
  );
  Ok(())
}
