mod analysis;
mod commands;
mod core;
mod harness;

use clap::{Parser, Subcommand};
use crate::core::error::{TriageError, print_error};
use std::path::PathBuf;

/// Run only the Python integration tests your diff actually touches
#[derive(Parser)]
#[command(name = "pytriage")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show which integration tests are selected by the current changes
  Affected {
    /// Name of the workflow base class whose direct subclasses mark a test as relevant
    base_class: String,
    /// Explicit changed files (skips the git query)
    #[arg(long, num_args = 1..)]
    files: Option<Vec<PathBuf>>,
    /// Git ref to diff against when --files is omitted (default: previous checkout)
    #[arg(long)]
    since: Option<String>,
    /// Directory to walk for candidate test files
    #[arg(long)]
    start_directory: Option<PathBuf>,
    /// Filename glob candidate test files must match
    #[arg(long)]
    pattern: Option<String>,
    /// Output format: text (default), json, names-only
    #[arg(long, default_value = "text")]
    format: String,
    /// List the changed files that would be analyzed, then stop
    #[arg(long)]
    dry_run: bool,
  },

  /// Select the affected integration tests and execute them
  Run {
    /// Name of the workflow base class whose direct subclasses mark a test as relevant
    base_class: String,
    /// Explicit changed files (skips the git query)
    #[arg(long, num_args = 1..)]
    files: Option<Vec<PathBuf>>,
    /// Git ref to diff against when --files is omitted (default: previous checkout)
    #[arg(long)]
    since: Option<String>,
    /// Directory to walk for candidate test files
    #[arg(long)]
    start_directory: Option<PathBuf>,
    /// Filename glob candidate test files must match
    #[arg(long)]
    pattern: Option<String>,
    /// Python interpreter used for test discovery and execution
    #[arg(long)]
    python: Option<String>,
    /// Show the selection plan without executing anything
    #[arg(long)]
    dry_run: bool,
  },
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
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match crate::core::context::TriageContext::build(&root) {
    Ok(ctx) => ctx,
    Err(e) => {
      handle_error(e);
    }
  };

  let result = match cli.command {
    Commands::Affected {
      base_class,
      files,
      since,
      start_directory,
      pattern,
      format,
      dry_run,
    } => commands::run_affected(&ctx, base_class, files, since, start_directory, pattern, format, dry_run),
    Commands::Run {
      base_class,
      files,
      since,
      start_directory,
      pattern,
      python,
      dry_run,
    } => commands::run_run(&ctx, base_class, files, since, start_directory, pattern, python, dry_run),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: TriageError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
