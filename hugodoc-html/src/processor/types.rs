//! Type definitions shared by the processing passes.
//!
//! Contains:
//! - The per-document state every pass works with (`ProcessorContext`)
//! - The pass trait (`ContentProcessor`)
use log::warn;

use crate::{
  store::ContentStore,
  types::{Diagnostic, DocumentInfo},
};

/// Everything a pass may read or stage while one document is processed.
#[derive(Debug)]
pub struct ProcessorContext {
  info:        DocumentInfo,
  store:       ContentStore,
  diagnostics: Vec<Diagnostic>,
}

impl ProcessorContext {
  #[must_use]
  pub fn new(info: DocumentInfo) -> Self {
    Self::with_store(info, ContentStore::new())
  }

  /// Start from content staged elsewhere, e.g. by a previous run.
  #[must_use]
  pub const fn with_store(info: DocumentInfo, store: ContentStore) -> Self {
    Self {
      info,
      store,
      diagnostics: Vec::new(),
    }
  }

  #[must_use]
  pub const fn info(&self) -> &DocumentInfo {
    &self.info
  }

  #[must_use]
  pub const fn store(&self) -> &ContentStore {
    &self.store
  }

  pub const fn store_mut(&mut self) -> &mut ContentStore {
    &mut self.store
  }

  /// Split borrow used by passes that read settings while staging content.
  pub const fn parts_mut(&mut self) -> (&DocumentInfo, &mut ContentStore) {
    (&self.info, &mut self.store)
  }

  /// Anomalies recorded so far, in the order they were noticed.
  #[must_use]
  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  /// Log a recoverable anomaly and keep it for the caller.
  pub fn warn(&mut self, diagnostic: Diagnostic) {
    warn!("{}: {diagnostic}", self.info.document_name);
    self.diagnostics.push(diagnostic);
  }

  /// Hand back the staged content and the collected diagnostics.
  #[must_use]
  pub fn into_parts(self) -> (ContentStore, Vec<Diagnostic>) {
    (self.store, self.diagnostics)
  }
}

/// One step of the post-processing pipeline.
///
/// A pass receives the current top-level body and returns the body the next
/// pass should see. Side output goes into the context's store.
pub trait ContentProcessor {
  /// Short name used in logs.
  fn name(&self) -> &'static str;

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String;
}
