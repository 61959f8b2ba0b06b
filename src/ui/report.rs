//! Progress messages for a publish run
//!
//! Every message goes to one writer (stdout in the binary) so that calling build
//! systems see stage messages and echoed tool output interleaved in order.

use std::io::Write;

pub const UPLOADING: &str = "Uploading artifacts...";
pub const UPLOADED: &str = "Artifacts uploaded.";
pub const KEY_FAILED: &str = "Failed to retrieve the storage key.";
pub const PUBLISHING: &str = "Publishing the product...";
pub const PUBLISHED: &str = "Product published.";
pub const PUBLISH_FAILED: &str = "Failed to publish the product.";
pub const OPERATION_FAILED: &str = "Operation failed";

/// Writes stage messages and echoed tool output
pub struct Reporter<W: Write> {
  out: W,
  echo: bool,
}

impl<W: Write> Reporter<W> {
  pub fn new(out: W, echo: bool) -> Self {
    Self { out, echo }
  }

  /// Write one stage message
  pub fn status(&mut self, message: &str) {
    self.line(message);
  }

  /// Echo one line of tool output (no-op when echo is off)
  pub fn echo(&mut self, line: &str) {
    if self.echo {
      self.line(line);
    }
  }

  fn line(&mut self, text: &str) {
    // A closed stdout must not abort a release half-way
    if writeln!(self.out, "{}", text).and_then(|_| self.out.flush()).is_err() {
      tracing::warn!("could not write progress output: {}", text);
    }
  }

  #[cfg(test)]
  pub fn into_inner(self) -> W {
    self.out
  }
}
