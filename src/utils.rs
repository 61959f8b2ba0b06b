//! Utility functions for displaying tool command lines

use std::path::Path;

/// Flag prefixes whose values never appear in logs or plans
const SECRET_FLAGS: &[&str] = &["-p="];

/// Placeholder shown instead of a secret value
pub const REDACTED: &str = "********";

/// Replace the value of secret flags (e.g. `-p=<password>`) with a placeholder
pub fn redact_arg(arg: &str) -> String {
  for prefix in SECRET_FLAGS {
    if arg.starts_with(prefix) {
      return format!("{}{}", prefix, REDACTED);
    }
  }
  arg.to_string()
}

/// Quote an argument for display if it contains whitespace or quotes
///
/// Display only. Arguments are always passed to tools as separate argv entries.
pub fn display_quote(arg: &str) -> String {
  if arg.is_empty() {
    return "\"\"".to_string();
  }
  if arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
    format!("'{}'", arg.replace('\'', "'\\''"))
  } else {
    arg.to_string()
  }
}

/// Render a program and its arguments as one line, secrets redacted
pub fn render_command_line(program: &Path, args: &[String]) -> String {
  let mut parts = vec![display_quote(&program.to_string_lossy())];
  parts.extend(args.iter().map(|a| display_quote(&redact_arg(a))));
  parts.join(" ")
}
