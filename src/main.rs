mod commands;
mod core;
mod process;
mod release;
mod ui;
mod utils;

use clap::Parser;
use crate::core::config::PublisherConfig;
use crate::core::error::{PublisherError, ResultExt, print_error};
use crate::core::invocation::separate_positionals;
use crate::core::outcome::{ExitCodeStyle, Outcome};
use std::path::PathBuf;
use tracing::{Level, debug, subscriber};
use tracing_subscriber::{FmtSubscriber, fmt::writer::MakeWriterExt};

/// Upload a built product with the storage client, then publish it with the publishing client
#[derive(Parser)]
#[command(name = "product-publisher")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Config file (default: publisher.toml, .publisher.toml or .config/publisher.toml)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Diagnostic log level (written to stderr)
  #[arg(long, default_value_t = Level::WARN)]
  level: Level,

  /// Show the planned tool invocations without running them
  #[arg(long)]
  dry_run: bool,

  /// Output the dry-run plan in JSON format
  #[arg(long, requires = "dry_run")]
  json: bool,

  /// USERNAME PASSWORD ENV SYSTEM_TAG PRODUCT_TYPE PRODUCT_VERSION PRODUCT_DIR STORAGE_CLIENT PUBLISHING_CLIENT
  ///
  /// Taken verbatim, even when a value starts with `-`. Options go first; `--` ends them.
  #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
  args: Vec<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(level: Level) {
  let writer = std::io::stderr.with_max_level(level);

  let mut builder = FmtSubscriber::builder()
    .with_max_level(level)
    .with_target(false)
    .with_writer(writer)
    .without_time();

  if [Level::DEBUG, Level::TRACE].contains(&level) {
    builder = builder.with_file(true).with_line_number(true);
  }

  if let Err(e) = subscriber::set_global_default(builder.finish()) {
    eprintln!("Warning: Could not initialize logging: {}", e);
  }
}

/// Parse the command line with the positional values kept out of option parsing
fn parse_cli() -> Cli {
  let mut raw = std::env::args_os();
  let program = raw.next();
  Cli::parse_from(program.into_iter().chain(separate_positionals(raw.collect())))
}

fn main() {
  let cli = parse_cli();
  init_logging(cli.level);

  let workspace_root = match std::env::current_dir().context("Failed to get current directory") {
    Ok(dir) => dir,
    Err(e) => fail(e, ExitCodeStyle::default()),
  };

  let config = match PublisherConfig::resolve(cli.config.as_deref(), &workspace_root) {
    Ok((config, Some(path))) => {
      debug!(path = %path.display(), "loaded config");
      config
    }
    Ok((config, None)) => config,
    Err(e) => fail(e, ExitCodeStyle::default()),
  };
  let style = config.exit_code_style;

  let options = commands::PublishOptions {
    dry_run: cli.dry_run,
    json: cli.json,
    args: cli.args,
  };

  let outcome = match commands::run_publish(env!("CARGO_PKG_NAME"), &config, &options) {
    Ok(()) => Outcome::Success,
    Err(e) => {
      print_error(&e);
      e.outcome()
    }
  };

  if !outcome.is_success() {
    debug!(%outcome, "run failed");
  }
  std::process::exit(outcome.exit_code(style));
}

fn fail(err: PublisherError, style: ExitCodeStyle) -> ! {
  print_error(&err);
  std::process::exit(err.outcome().exit_code(style));
}
