//! The post-processing pipeline.
//!
//! A compiled document runs through a fixed sequence of passes, each
//! receiving the body produced by the one before it:
//!
//! 1. [`TocExtractor`] moves the table of contents into its own file
//! 2. [`FontAwesomeIcons`] swaps admonition icon classes
//! 3. [`HtmlContentFixups`] tags code blocks and drops the preamble
//! 4. [`MultipageProcessor`] splits the document into pages
//! 5. [`FrontMatter`] prepends the front matter
//!
//! Files produced along the way are staged in the context's
//! [`ContentStore`] and written by the caller once every pass has run.
pub mod passes;
pub mod types;

use log::trace;

pub use self::{
  passes::{FontAwesomeIcons, FrontMatter, HtmlContentFixups, TocExtractor},
  types::{ContentProcessor, ProcessorContext},
};
use crate::{
  multipage::MultipageProcessor,
  store::ContentStore,
  types::{Diagnostic, DocumentInfo},
};

/// Outcome of running the pipeline over one document.
#[derive(Debug)]
pub struct ProcessedDocument {
  /// The replacement top-level body.
  pub body:        String,
  /// Files staged by the passes, not yet written.
  pub store:       ContentStore,
  /// Recoverable anomalies noticed on the way.
  pub diagnostics: Vec<Diagnostic>,
}

/// Ordered list of passes.
pub struct Pipeline {
  passes: Vec<Box<dyn ContentProcessor + Send + Sync>>,
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::empty()
      .with_pass(TocExtractor)
      .with_pass(FontAwesomeIcons)
      .with_pass(HtmlContentFixups)
      .with_pass(MultipageProcessor)
      .with_pass(FrontMatter)
  }
}

impl Pipeline {
  /// A pipeline without any passes.
  #[must_use]
  pub fn empty() -> Self {
    Self { passes: Vec::new() }
  }

  /// Append a pass.
  #[must_use]
  pub fn with_pass<P>(mut self, pass: P) -> Self
  where
    P: ContentProcessor + Send + Sync + 'static,
  {
    self.passes.push(Box::new(pass));
    self
  }

  /// Names of the passes, in execution order.
  pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.passes.iter().map(|pass| pass.name())
  }

  /// Run every pass over `content`.
  pub fn run(&self, context: &mut ProcessorContext, content: &str) -> String {
    self
      .passes
      .iter()
      .fold(content.to_string(), |body, pass| {
        trace!("Running {} pass", pass.name());
        pass.process(context, &body)
      })
  }

  /// Run the pipeline over one document with a fresh store.
  #[must_use]
  pub fn process_document(
    &self,
    info: DocumentInfo,
    content: &str,
  ) -> ProcessedDocument {
    let mut context = ProcessorContext::new(info);
    let body = self.run(&mut context, content);
    let (store, diagnostics) = context.into_parts();
    ProcessedDocument {
      body,
      store,
      diagnostics,
    }
  }
}
