use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use hugodoc::{
  cli::Cli,
  config::Config,
  utils::{self, DocumentReport},
};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so configuration problems are reported
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let mut config = Config::load(&cli.config_files, &cli.config_overrides)?;
  config.merge_with_cli(&cli);
  config.validate()?;

  generate(&config, &cli)
}

/// Process every input document into the output directory.
fn generate(config: &Config, cli: &Cli) -> Result<()> {
  let documents = utils::collect_documents(&cli.inputs);
  if documents.is_empty() {
    bail!("No HTML documents found in the given inputs");
  }

  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;
  info!("Output directory: {}", config.output_dir.display());

  let base = config.base_info();
  let reports = utils::process_documents(
    &documents,
    &base,
    &config.output_dir,
    config.jobs,
  )?;

  let files: usize = reports.iter().map(|report| report.files_written).sum();
  let skipped: usize = reports.iter().map(|report| report.diagnostics).sum();
  for DocumentReport {
    name,
    files_written,
    ..
  } in &reports
  {
    info!("{name}: {files_written} files");
  }
  info!(
    "Wrote {files} files for {} documents to {} ({skipped} problems skipped)",
    reports.len(),
    config.output_dir.display()
  );

  Ok(())
}
