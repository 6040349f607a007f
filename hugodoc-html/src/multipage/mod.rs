//! Splitting of one compiled document into a tree of linked pages.
//!
//! The pass reads the `sect{N}` structure of the body, stages one page per
//! section below a folder named after the document, stages a matching table
//! of contents and replaces the body with an index of the top-level
//! sections. Intra-document links are rewritten to point at the page their
//! target moved to.
//!
//! ```
//! use hugodoc_html::{
//!   DocumentInfo,
//!   multipage::MultipageProcessor,
//!   processor::{ContentProcessor, ProcessorContext},
//! };
//!
//! let mut info = DocumentInfo::new("guide");
//! info.multipage = true;
//!
//! let mut context = ProcessorContext::new(info);
//! let body = MultipageProcessor.process(
//!   &mut context,
//!   r#"<div class="sect1"><h2 id="_intro">Intro</h2><p>Hello</p></div>"#,
//! );
//!
//! assert_eq!(body, "<ul>\n<li><a href=\"guide/intro\">Intro</a></li>\n</ul>");
//! assert!(context.store().get(Some("guide"), "intro.html").is_some());
//! assert!(context.store().get(None, "guide.toc.html").is_some());
//! ```
pub mod anchors;
pub mod pages;
pub mod sections;
pub mod toc;

use log::info;

pub use self::{
  anchors::AnchorRewriter,
  sections::{HeaderTemplate, SectionTreeBuilder, WeightSequence},
};
use crate::{
  processor::{ContentProcessor, ProcessorContext},
  types::{Diagnostic, DocumentInfo, Section},
  utils::dom,
};

/// Build the page tree of `content` without staging anything.
#[must_use]
pub fn build_sections(
  info: &DocumentInfo,
  content: &str,
) -> (Vec<Section>, Vec<Diagnostic>) {
  let document = dom::parse_document(content);
  let rewriter = AnchorRewriter::new(info, &document);
  let mut diagnostics = Vec::new();
  let sections =
    SectionTreeBuilder::new(info, &rewriter).build(&document, &mut diagnostics);
  (sections, diagnostics)
}

/// Pass that splits the document when multipage output is enabled and leaves
/// it alone otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipageProcessor;

impl ContentProcessor for MultipageProcessor {
  fn name(&self) -> &'static str {
    "multipage"
  }

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String {
    if !context.info().multipage {
      return content.to_string();
    }

    let document = dom::parse_document(content);
    let mut diagnostics = Vec::new();
    let body = {
      let (info, store) = context.parts_mut();
      let rewriter = AnchorRewriter::new(info, &document);
      let sections = SectionTreeBuilder::new(info, &rewriter)
        .build(&document, &mut diagnostics);

      let pages = pages::emit_pages(info, store, &sections);
      diagnostics.extend(toc::stage_toc(info, store, &rewriter, &sections));
      info!(
        "Split `{}` into {pages} pages ({} top-level)",
        info.document_name,
        sections.len()
      );

      let preamble = dom::select_first(&document, "div#preamble")
        .map(|preamble| dom::outer_html(&preamble));
      pages::index_page(info, preamble.as_deref(), &sections)
    };

    for diagnostic in diagnostics {
      context.warn(diagnostic);
    }
    body
  }
}
