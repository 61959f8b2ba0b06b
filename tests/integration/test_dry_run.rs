//! `--dry-run` plans

use crate::helpers::{TestBench, run_publisher, stdout};
use anyhow::Result;

#[test]
fn test_dry_run_prints_plan_without_running() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let mut args = vec!["--dry-run".to_string()];
  args.extend(bench.args(&storage, &publisher));
  let output = run_publisher(&bench.path, &args)?;

  assert_eq!(output.status.code(), Some(0));
  let out = stdout(&output);
  assert!(out.contains("UploadDirectory"));
  assert!(out.contains("-key=<storage-key>"));
  assert!(out.contains("-p=********"));
  assert!(!out.contains("s3cret"));

  assert_eq!(bench.recorded_args("storage")?, None);
  assert_eq!(bench.recorded_args("publisher")?, None);
  Ok(())
}

#[test]
fn test_dry_run_json() -> Result<()> {
  let bench = TestBench::new()?;
  let storage = bench.tool("storage", "{KEY}\n", 0)?;
  let publisher = bench.tool("publisher", "", 0)?;

  let mut args = vec!["--dry-run".to_string(), "--json".to_string()];
  args.extend(bench.args(&storage, &publisher));
  let output = run_publisher(&bench.path, &args)?;
  assert_eq!(output.status.code(), Some(0));

  let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");
  assert_eq!(json["upload"]["args"][0], "UploadDirectory");
  assert_eq!(
    json["upload"]["args"][1],
    format!("-dir={}", bench.product_dir.display()).as_str()
  );
  assert_eq!(json["publish"]["args"][0], "-POST");
  assert_eq!(json["publish"]["args"][2], "-p=********");
  Ok(())
}
