//! Argument count validation and option handling

use crate::helpers::{TestBench, run_publisher, stderr, stdout};
use anyhow::Result;

#[test]
fn test_no_arguments_prints_usage() -> Result<()> {
  let bench = TestBench::new()?;
  let output = run_publisher(&bench.path, &[])?;

  assert_eq!(output.status.code(), Some(1));
  let out = stdout(&output);
  assert!(out.starts_with("Usage: product-publisher"), "stdout: {}", out);
  for name in ["USERNAME", "PASSWORD", "SYSTEM_TAG", "PRODUCT_DIR", "STORAGE_CLIENT", "PUBLISHING_CLIENT"] {
    assert!(out.contains(name), "usage should describe {}", name);
  }
  assert!(stderr(&output).contains("Expected 9 arguments, got 0"));
  Ok(())
}

#[test]
fn test_wrong_arity_never_runs_tools() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;
  let full = bench.args(&storage, &publisher);

  let mut too_many = full.clone();
  too_many.push("extra".to_string());

  for args in [full[..8].to_vec(), full[..1].to_vec(), too_many] {
    let output = run_publisher(&bench.path, &args)?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Usage:"));
    assert!(!stdout(&output).contains("Uploading artifacts..."));
  }

  assert_eq!(bench.recorded_args("storage")?, None);
  assert_eq!(bench.recorded_args("publisher")?, None);
  Ok(())
}

#[test]
fn test_legacy_exit_code_style() -> Result<()> {
  let bench = TestBench::new()?;
  bench.write_config("exit_code_style = \"legacy\"\n")?;

  let output = run_publisher(&bench.path, &["only-one".to_string()])?;
  // -1 wraps to 255 on Unix
  assert_eq!(output.status.code(), Some(255));
  Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
  let bench = TestBench::new()?;
  bench.write_config("retries = 5\n")?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let output = run_publisher(&bench.path, &bench.args(&storage, &publisher))?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Failed to parse config"));
  assert_eq!(bench.recorded_args("storage")?, None);
  Ok(())
}

#[test]
fn test_hyphen_username_is_passed_through() -> Result<()> {
  for username in ["-h", "--help", "--json", "--dry-run", "--"] {
    let bench = TestBench::new()?;
    let storage = bench.tool("storage", "{KEY}\n", 0)?;
    let publisher = bench.tool("publisher", "", 0)?;
    let mut args = bench.args(&storage, &publisher);
    args[0] = username.to_string();

    let output = run_publisher(&bench.path, &args)?;
    assert_eq!(output.status.code(), Some(0), "username {}: {}", username, stderr(&output));
    assert!(stdout(&output).ends_with("Product published.\n"), "username {}", username);

    assert!(bench.recorded_args("storage")?.is_some(), "storage client skipped for {}", username);
    let published = bench.recorded_args("publisher")?.unwrap_or_default();
    assert_eq!(published.get(1), Some(&format!("-u={}", username)));
  }
  Ok(())
}

#[test]
fn test_options_before_hyphen_username() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;
  let mut args = vec!["--dry-run".to_string()];
  let mut positionals = bench.args(&storage, &publisher);
  positionals[0] = "--json".to_string();
  args.extend(positionals);

  let output = run_publisher(&bench.path, &args)?;
  assert_eq!(output.status.code(), Some(0));
  let out = stdout(&output);
  assert!(out.contains("-u=--json"), "stdout: {}", out);
  assert!(!out.trim_start().starts_with('{'), "plan should be text, not JSON");
  assert_eq!(bench.recorded_args("storage")?, None);
  Ok(())
}

#[test]
fn test_help_still_works_without_arguments() -> Result<()> {
  let bench = TestBench::new()?;
  let output = run_publisher(&bench.path, &["--help".to_string()])?;
  assert_eq!(output.status.code(), Some(0));
  assert!(stdout(&output).contains("--dry-run"));
  Ok(())
}
