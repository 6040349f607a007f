use std::path::PathBuf;

use clap::Parser;

/// Command line interface for hugodoc
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "hugodoc: AsciiDoc HTML in, Hugo content out"
)]
pub struct Cli {
  /// Compiled HTML documents, or directories to search for them
  #[arg(required = true)]
  pub inputs: Vec<PathBuf>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,

  /// Directory the generated content is written to.
  #[arg(short, long)]
  pub output_dir: Option<PathBuf>,

  /// Split every document into one page per section.
  #[arg(short, long)]
  pub multipage: bool,

  /// Deepest section level that still gets its own page.
  #[arg(short = 'l', long)]
  pub multipage_level: Option<usize>,

  /// Prefix for links to generated pages, e.g. `/docs/`.
  #[arg(long)]
  pub multipage_ref: Option<String>,

  /// File with the header template of generated pages. Understands
  /// `{title}` and `{weight}`.
  #[arg(long)]
  pub multipage_header: Option<PathBuf>,

  /// File with the front matter of the top-level page.
  #[arg(short = 'H', long)]
  pub header: Option<PathBuf>,

  /// Keep the admonition icon classes as they are.
  #[arg(long)]
  pub no_font_awesome: bool,

  /// Keep the preamble on the top-level page.
  #[arg(long)]
  pub keep_preamble: bool,

  /// Number of threads to use for parallel processing.
  #[arg(short = 'p', long = "jobs")]
  pub jobs: Option<usize>,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
