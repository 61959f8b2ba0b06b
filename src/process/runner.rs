//! Child-process execution with line-streamed standard output
//!
//! Tools are started with a structured argument list, never through a shell, so
//! argument values reach the child exactly as given.

use crate::core::error::{PublisherError, PublisherResult, Stage, ToolFailure};
use crate::utils::render_command_line;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

/// Everything a finished tool run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
  /// Standard output, one entry per line, line terminators removed
  pub lines: Vec<String>,
  /// Exit code; `None` when the process was killed by a signal
  pub status: Option<i32>,
}

impl ToolOutput {
  pub fn succeeded(&self) -> bool {
    self.status == Some(0)
  }
}

/// Runs an external tool and hands back its output
pub trait ToolRunner {
  /// Run `program` with `args`, calling `on_line` for each stdout line as it arrives.
  ///
  /// Blocks until the output stream closes and the process has exited.
  fn run(
    &mut self,
    stage: Stage,
    program: &Path,
    args: &[String],
    on_line: &mut dyn FnMut(&str),
  ) -> PublisherResult<ToolOutput>;
}

/// Runner backed by real child processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
  pub fn new() -> Self {
    Self
  }

  fn tool_error(stage: Stage, program: &Path, reason: ToolFailure) -> PublisherError {
    PublisherError::Tool {
      stage,
      program: PathBuf::from(program),
      reason,
    }
  }
}

impl ToolRunner for SystemRunner {
  fn run(
    &mut self,
    stage: Stage,
    program: &Path,
    args: &[String],
    on_line: &mut dyn FnMut(&str),
  ) -> PublisherResult<ToolOutput> {
    let mut child = Command::new(program)
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit())
      .spawn()
      .map_err(|e| Self::tool_error(stage, program, ToolFailure::Spawn(e)))?;

    debug!(pid = child.id(), "spawned {}", stage);

    let stdout = child.stdout.take().ok_or_else(|| {
      Self::tool_error(
        stage,
        program,
        ToolFailure::Stream(std::io::Error::other("stdout was not captured")),
      )
    })?;

    let mut lines = Vec::new();
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    loop {
      buf.clear();
      let read = match reader.read_until(b'\n', &mut buf) {
        Ok(read) => read,
        Err(e) => {
          // Reap the child before bailing
          let _ = child.kill();
          let _ = child.wait();
          return Err(Self::tool_error(stage, program, ToolFailure::Stream(e)));
        }
      };
      if read == 0 {
        break;
      }

      let line = decode_line(&buf);
      trace!(line = %line, "{} output", stage);
      on_line(&line);
      lines.push(line);
    }

    // The stream is closed once the reader is dropped
    drop(reader);

    let status = child
      .wait()
      .map_err(|e| Self::tool_error(stage, program, ToolFailure::Stream(e)))?;

    debug!(
      lines = lines.len(),
      status = ?status.code(),
      "{} finished: {}",
      stage,
      render_command_line(program, args)
    );

    Ok(ToolOutput {
      lines,
      status: status.code(),
    })
  }
}

/// Strip the line terminator (`\n` or `\r\n`) and decode lossily
fn decode_line(raw: &[u8]) -> String {
  let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
  let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
  String::from_utf8_lossy(raw).into_owned()
}
