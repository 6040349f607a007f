//! Table of contents for split documents.
use std::fmt::Write;

use super::anchors::AnchorRewriter;
use crate::{
  store::ContentStore,
  types::{Diagnostic, DocumentInfo, Section},
  utils::{dom, escape_attribute, escape_text},
};

/// Navigation markup for `sections`, one nested `<ul>` per tree level.
#[must_use]
pub fn render_toc(info: &DocumentInfo, sections: &[Section]) -> String {
  let mut html = String::from(r#"<div id="toc" class="toc toc-side">"#);
  render_level(info, sections, 1, &mut html);
  html.push_str("</div>");
  html
}

fn render_level(
  info: &DocumentInfo,
  sections: &[Section],
  depth: usize,
  html: &mut String,
) {
  // Writing to String is infallible
  let _ = writeln!(html, "\n<ul class=\"sectlevel{depth} nav\">");
  for section in sections {
    let _ = write!(
      html,
      "  <li><a href=\"{}\" id=\"{}\" class=\"nav-link\">{}</a>",
      escape_attribute(&info.page_ref(section.id())),
      escape_attribute(section.id()),
      escape_text(section.title())
    );
    if !section.is_leaf() {
      render_level(info, section.children(), depth + 1, html);
    }
    html.push_str("</li>\n");
  }
  html.push_str("</ul>\n");
}

/// Stage the table of contents for the split document.
///
/// Without a previously staged table of contents a fresh one is rendered
/// from `sections`. Otherwise the staged one is kept, with its links pointed
/// at the generated pages. A staged table of contents that is empty or has
/// no markup is left untouched and reported.
pub fn stage_toc(
  info: &DocumentInfo,
  store: &mut ContentStore,
  rewriter: &AnchorRewriter<'_>,
  sections: &[Section],
) -> Option<Diagnostic> {
  let name = info.toc_file_name();
  let Some(staged) = store.get(None, &name) else {
    store.add(None, &name, render_toc(info, sections));
    return None;
  };

  if staged.trim().is_empty() {
    return Some(Diagnostic::EmptyStagedToc { name });
  }

  let document = dom::parse_document(staged);
  let has_markup = dom::body(&document)
    .is_some_and(|body| dom::element_children(&body).next().is_some());
  if !has_markup {
    return Some(Diagnostic::UnparsableStagedToc { name });
  }

  rewriter.rewrite_in_place(&document, true);
  store.add(None, &name, dom::body_html(&document));
  None
}
