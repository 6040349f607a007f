//! Section tree extraction.
//!
//! The HTML backend marks every section with a `sect{N}` class and puts its
//! heading, an `h{N+1}` element, first among the section's children. The
//! builder turns that convention into a forest of [`Section`]s, one per
//! output page.
use std::{fmt::Write, sync::LazyLock};

use kuchikikiki::NodeRef;
use log::{debug, error};
use regex::{Captures, Regex};

use super::anchors::AnchorRewriter;
use crate::{
  types::{Diagnostic, DocumentInfo, Section},
  utils::{
    dom,
    escape_attribute,
    escape_text,
    normalize_id,
    strip_chapter_number,
  },
};

/// Heading of a section element: the raw anchor id of its `h{N+1}` child and
/// the text of its first child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
  pub raw_id: String,
  pub title:  String,
}

/// Find the heading of a section element at `level`.
///
/// The heading is the first child tagged `h{level + 1}`; it must carry an id
/// that is still non-empty once normalized. The title is taken from the first
/// element child, which by convention is that same heading. Returns `None`
/// when either is missing.
#[must_use]
pub fn section_heading(element: &NodeRef, level: usize) -> Option<SectionHeading> {
  let raw_id = header_id(element, level)?;
  let title = dom::element_children(element).next().map(|first| dom::text(&first))?;
  Some(SectionHeading { raw_id, title })
}

/// Raw id of the first `h{level + 1}` child of `element`. Ids made only of
/// underscores count as missing.
pub(crate) fn header_id(element: &NodeRef, level: usize) -> Option<String> {
  let tag = format!("h{}", level + 1);
  dom::element_children(element)
    .find(|child| dom::is_tag(child, &tag))
    .and_then(|header| dom::id(&header))
    .filter(|id| !normalize_id(id).is_empty())
}

/// Sequence of `{weight}` values handed out to page headers, in the order
/// the pages are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightSequence {
  next: u32,
}

impl Default for WeightSequence {
  fn default() -> Self {
    Self { next: 1 }
  }
}

impl WeightSequence {
  /// Weight for the next page: 10, 20, 30, ...
  pub const fn take(&mut self) -> u32 {
    let weight = self.next * 10;
    self.next += 1;
    weight
  }
}

/// Page header template with `{title}` and `{weight}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct HeaderTemplate<'a> {
  template: &'a str,
}

impl<'a> HeaderTemplate<'a> {
  #[must_use]
  pub const fn new(template: &'a str) -> Self {
    Self { template }
  }

  /// Fill in the placeholders. A leading chapter number is dropped from the
  /// title first; other `{...}` sequences are left alone.
  #[must_use]
  pub fn render(&self, title: &str, weight: u32) -> String {
    static PLACEHOLDER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
      Regex::new(r"\{(title|weight)\}")
        .map_err(|e| error!("Failed to compile PLACEHOLDER_RE regex: {e}"))
        .ok()
    });

    let title = strip_chapter_number(title);
    let weight = weight.to_string();
    match PLACEHOLDER_RE.as_ref() {
      Some(re) => {
        re.replace_all(self.template, |caps: &Captures| {
          if &caps[1] == "title" {
            title.to_string()
          } else {
            weight.clone()
          }
        })
        .into_owned()
      },
      None => {
        self
          .template
          .replace("{title}", title)
          .replace("{weight}", &weight)
      },
    }
  }
}

/// Builds the page tree for one parsed document.
pub struct SectionTreeBuilder<'a> {
  info:     &'a DocumentInfo,
  template: HeaderTemplate<'a>,
  rewriter: &'a AnchorRewriter<'a>,
}

impl<'a> SectionTreeBuilder<'a> {
  #[must_use]
  pub const fn new(
    info: &'a DocumentInfo,
    rewriter: &'a AnchorRewriter<'a>,
  ) -> Self {
    Self {
      info,
      template: HeaderTemplate::new(info.multipage_header.as_str()),
      rewriter,
    }
  }

  /// Top-level sections of `document`, with their whole subtrees.
  ///
  /// Sections without a heading are dropped and reported in `diagnostics`.
  pub fn build(
    &self,
    document: &NodeRef,
    diagnostics: &mut Vec<Diagnostic>,
  ) -> Vec<Section> {
    let mut weights = WeightSequence::default();
    self.build_level(document, 1, &mut weights, diagnostics)
  }

  fn build_level(
    &self,
    container: &NodeRef,
    level: usize,
    weights: &mut WeightSequence,
    diagnostics: &mut Vec<Diagnostic>,
  ) -> Vec<Section> {
    dom::select(container, &format!(".sect{level}"))
      .iter()
      .filter_map(|element| {
        self.build_section(element, level, weights, diagnostics)
      })
      .collect()
  }

  fn build_section(
    &self,
    element: &NodeRef,
    level: usize,
    weights: &mut WeightSequence,
    diagnostics: &mut Vec<Diagnostic>,
  ) -> Option<Section> {
    let Some(SectionHeading { raw_id, title }) = section_heading(element, level)
    else {
      diagnostics.push(Diagnostic::MissingHeader {
        level,
        element: dom::id(element),
        snippet: dom::element_children(element)
          .next()
          .map(|first| dom::outer_html(&first))
          .unwrap_or_default(),
      });
      return None;
    };

    let header = self.template.render(&title, weights.take());
    let children = if level < self.info.page_level() {
      self.build_level(element, level + 1, weights, diagnostics)
    } else {
      Vec::new()
    };

    let content = if children.is_empty() {
      header + &self.rewriter.rewrite_element(element)
    } else {
      header + &self.index_section(&title, &children)
    };
    debug!(
      "Built sect{level} `{}` with {} subsections",
      normalize_id(&raw_id),
      children.len()
    );

    Some(Section::new(&raw_id, title, content, children))
  }

  /// Body of a section whose content moved to its subsection pages.
  fn index_section(&self, title: &str, children: &[Section]) -> String {
    let mut html = format!("<div><h2>{}</h2>\n", escape_text(title));
    html.push_str(&section_list(self.info, children));
    html.push_str("</div>\n");
    html
  }
}

/// `<ul>` linking every section of `sections` to its page.
#[must_use]
pub fn section_list(info: &DocumentInfo, sections: &[Section]) -> String {
  let mut html = String::from("<ul>\n");
  for section in sections {
    // Writing to String is infallible
    let _ = writeln!(
      html,
      "<li><a href=\"{}\">{}</a></li>",
      escape_attribute(&info.page_ref(section.id())),
      escape_text(section.title())
    );
  }
  html.push_str("</ul>");
  html
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_weights_step_by_ten() {
    let mut weights = WeightSequence::default();
    assert_eq!(weights.take(), 10);
    assert_eq!(weights.take(), 20);
    assert_eq!(weights.take(), 30);
  }

  #[test]
  fn test_template_substitution() {
    let template =
      HeaderTemplate::new("---\ntitle: {title}\nweight: {weight}\n---\n");
    assert_eq!(
      template.render("2. Main Data Structures", 20),
      "---\ntitle: Main Data Structures\nweight: 20\n---\n"
    );
  }

  #[test]
  fn test_template_leaves_unknown_placeholders() {
    let template = HeaderTemplate::new("{title} {menu} {weight} {title}");
    assert_eq!(template.render("Intro", 10), "Intro {menu} 10 Intro");
  }

  #[test]
  fn test_template_does_not_expand_placeholders_inside_the_title() {
    let template = HeaderTemplate::new("{title}|{weight}");
    assert_eq!(template.render("Using {weight}", 30), "Using {weight}|30");
  }

  #[test]
  fn test_section_heading_takes_first_matching_header() {
    let document = dom::parse_document(
      r#"<div class="sect1"><h2 id="_first">First</h2><h2 id="_second">Second</h2></div>"#,
    );
    let element = dom::select_first(&document, ".sect1").expect("section");

    assert_eq!(
      section_heading(&element, 1),
      Some(SectionHeading {
        raw_id: "_first".into(),
        title:  "First".into(),
      })
    );
  }

  #[test]
  fn test_section_heading_needs_header_at_matching_depth() {
    let document = dom::parse_document(
      r#"<div class="sect1"><h3 id="_deep">Deep</h3><p>text</p></div>"#,
    );
    let element = dom::select_first(&document, ".sect1").expect("section");
    assert_eq!(section_heading(&element, 1), None);
  }

  #[test]
  fn test_section_heading_only_considers_first_matching_header() {
    let document = dom::parse_document(
      r#"<div class="sect1"><h2>Untagged</h2><h2 id="_later">Later</h2></div>"#,
    );
    let element = dom::select_first(&document, ".sect1").expect("section");
    assert_eq!(section_heading(&element, 1), None);
  }

  #[test]
  fn test_underscore_only_id_counts_as_missing() {
    let document = dom::parse_document(
      r#"<div class="sect1"><h2 id="__">Blank</h2><p>text</p></div>"#,
    );
    let element = dom::select_first(&document, ".sect1").expect("section");
    assert_eq!(section_heading(&element, 1), None);
  }

  #[test]
  fn test_section_heading_title_comes_from_first_child() {
    let document = dom::parse_document(
      r#"<div class="sect1"><span>Label</span><h2 id="_x">Heading</h2></div>"#,
    );
    let element = dom::select_first(&document, ".sect1").expect("section");
    let heading = section_heading(&element, 1).expect("heading");
    assert_eq!(heading.raw_id, "_x");
    assert_eq!(heading.title, "Label");
  }

  #[test]
  fn test_section_list_escapes_titles() {
    let info = DocumentInfo::new("doc");
    let sections = vec![Section::new(
      "_a",
      "Tom & Jerry".into(),
      String::new(),
      Vec::new(),
    )];
    assert_eq!(
      section_list(&info, &sections),
      "<ul>\n<li><a href=\"doc/a\">Tom &amp; Jerry</a></li>\n</ul>"
    );
  }
}
