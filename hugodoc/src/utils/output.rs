use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use hugodoc_html::{DocumentInfo, Pipeline};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::utils::InputDocument;

/// What processing one document produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
  pub name:          String,
  /// Files written to the output directory, the top-level page included.
  pub files_written: usize,
  /// Recoverable problems noticed while processing.
  pub diagnostics:   usize,
}

/// Run the pipeline over one document and write everything it produced
/// below `output_dir`.
///
/// The processed body is written as `{name}.html`; pages and the table of
/// contents go wherever the pipeline staged them.
///
/// # Errors
///
/// Returns an error if the document cannot be read or an output file
/// cannot be written.
pub fn process_document(
  pipeline: &Pipeline,
  base: &DocumentInfo,
  document: &InputDocument,
  output_dir: &Path,
) -> Result<DocumentReport> {
  let content = fs::read_to_string(&document.path).wrap_err_with(|| {
    format!("Failed to read document: {}", document.path.display())
  })?;

  let info = DocumentInfo {
    document_name: document.name.clone(),
    ..base.clone()
  };
  let processed = pipeline.process_document(info, &content);
  let diagnostics = processed.diagnostics.len();
  if diagnostics > 0 {
    warn!(
      "{}: {diagnostics} section(s) or tables of contents were skipped",
      document.name
    );
  }

  let mut store = processed.store;
  store.add(None, &format!("{}.html", document.name), processed.body);
  let files_written = store.flush(output_dir).wrap_err_with(|| {
    format!("Failed to write output of {}", document.name)
  })?;
  debug!("{}: wrote {files_written} files", document.name);

  Ok(DocumentReport {
    name: document.name.clone(),
    files_written,
    diagnostics,
  })
}

/// Process `documents` in parallel on a pool of `jobs` threads (all cores
/// when `None`).
///
/// # Errors
///
/// Returns the first error any document ran into. Documents are
/// independent, so the outputs of the others may already be written.
pub fn process_documents(
  documents: &[InputDocument],
  base: &DocumentInfo,
  output_dir: &Path,
  jobs: Option<usize>,
) -> Result<Vec<DocumentReport>> {
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(jobs.unwrap_or(0))
    .build()
    .wrap_err("Failed to build thread pool")?;
  let pipeline = Pipeline::default();

  info!(
    "Processing {} documents on {} threads",
    documents.len(),
    pool.current_num_threads()
  );
  pool.install(|| {
    documents
      .par_iter()
      .map(|document| process_document(&pipeline, base, document, output_dir))
      .collect()
  })
}
