//! # hugodoc-html
//!
//! Post-processing for HTML compiled from AsciiDoc, aimed at sites built with
//! Hugo. The centerpiece is the multipage split: a single long document is
//! turned into one page per section, with cross references rewritten so they
//! keep working after the content moved, and a table of contents to match.
//!
//! ## Quick Start
//!
//! ```rust
//! use hugodoc_html::{DocumentInfo, Pipeline};
//!
//! let mut info = DocumentInfo::new("guide");
//! info.multipage = true;
//!
//! let processed = Pipeline::default().process_document(
//!   info,
//!   r#"<div class="sect1"><h2 id="_intro">1. Intro</h2><p>Hi</p></div>"#,
//! );
//!
//! assert!(processed.body.starts_with("---\n---\n\n<ul>"));
//! assert!(processed.store.get(Some("guide"), "intro.html").is_some());
//! ```
//!
//! ## Markup conventions
//!
//! - Sections are elements with a `sect{N}` class.
//! - A section's heading is its first `h{N+1}` child; its id is the anchor of
//!   the section and, with leading underscores removed, the page name.
//! - A table of contents produced by the backend lives in `div#toc.toc`.
//!
//! Generated pages are staged as `{document}/{id}.html`, the table of
//! contents as `{document}.toc.html`. Nothing is written before
//! [`ContentStore::flush`] is called.

mod error;
pub mod multipage;
pub mod processor;
pub mod store;
mod types;
pub mod utils;

pub use crate::{
  error::{Error, Result},
  multipage::MultipageProcessor,
  processor::{
    ContentProcessor,
    Pipeline,
    ProcessedDocument,
    ProcessorContext,
  },
  store::{ContentKey, ContentStore},
  types::{Diagnostic, DocumentInfo, EMPTY_FRONT_MATTER, Section},
};
