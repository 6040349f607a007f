//! Types for the hugodoc-html public API and internal use.
use std::fmt;

use crate::utils::normalize_id;

/// Front matter used whenever no header file is configured or found.
pub const EMPTY_FRONT_MATTER: &str = "---\n---\n\n";

/// Read-only snapshot of the per-document settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Mirrors the boolean document attributes one to one"
)]
pub struct DocumentInfo {
  /// Name of the document, used for the page folder and reference paths.
  pub document_name: String,

  /// Front matter prepended to the top-level page.
  pub header: String,

  /// Split the document into one page per section.
  pub multipage: bool,

  /// Deepest section level that still gets its own page. Values below 1
  /// are treated as 1, see [`DocumentInfo::page_level`].
  pub multipage_level: usize,

  /// Template prepended to every generated page. Understands `{title}` and
  /// `{weight}`.
  pub multipage_header: String,

  /// Prefix put in front of every generated page reference.
  pub multipage_ref: String,

  /// Convert admonition icons to their Font Awesome counterparts.
  pub font_awesome_icons: bool,

  /// Keep the `div#preamble` block in the top-level page.
  pub keep_preamble: bool,
}

impl Default for DocumentInfo {
  fn default() -> Self {
    Self {
      document_name:      String::new(),
      header:             EMPTY_FRONT_MATTER.to_string(),
      multipage:          false,
      multipage_level:    1,
      multipage_header:   EMPTY_FRONT_MATTER.to_string(),
      multipage_ref:      String::new(),
      font_awesome_icons: true,
      keep_preamble:      false,
    }
  }
}

impl DocumentInfo {
  /// Settings for `document_name` with every other field at its default.
  #[must_use]
  pub fn new(document_name: impl Into<String>) -> Self {
    Self {
      document_name: document_name.into(),
      ..Self::default()
    }
  }

  /// Reference to a generated page, e.g. `/docs/guide/intro`.
  #[must_use]
  pub fn page_ref(&self, target: &str) -> String {
    format!("{}{}/{target}", self.multipage_ref, self.document_name)
  }

  /// Deepest section level split into pages, never below 1.
  #[must_use]
  pub fn page_level(&self) -> usize {
    self.multipage_level.max(1)
  }

  /// Name under which the table of contents is staged.
  #[must_use]
  pub fn toc_file_name(&self) -> String {
    format!("{}.toc.html", self.document_name)
  }
}

/// One node of the generated page tree.
///
/// Sections are built once per document pass and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  id:       String,
  title:    String,
  content:  String,
  children: Vec<Self>,
}

impl Section {
  pub(crate) fn new(
    raw_id: &str,
    title: String,
    content: String,
    children: Vec<Self>,
  ) -> Self {
    Self {
      id: normalize_id(raw_id).to_string(),
      title,
      content,
      children,
    }
  }

  /// Normalized anchor id, unique within the document.
  #[must_use]
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Plain-text heading of the section.
  #[must_use]
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Complete HTML of this section's own page.
  #[must_use]
  pub fn content(&self) -> &str {
    &self.content
  }

  /// Nested sections in document order.
  #[must_use]
  pub fn children(&self) -> &[Self] {
    &self.children
  }

  #[must_use]
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  /// File name of the generated page.
  #[must_use]
  pub fn output_name(&self) -> String {
    format!("{}.html", self.id)
  }

  /// Pre-order walk over this section and all of its descendants.
  pub fn walk(&self) -> impl Iterator<Item = &Self> {
    let mut stack = vec![self];
    std::iter::from_fn(move || {
      let next = stack.pop()?;
      stack.extend(next.children.iter().rev());
      Some(next)
    })
  }
}

/// Recoverable anomaly noticed while processing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
  /// A section element had no usable heading and was dropped together with
  /// everything nested in it.
  MissingHeader {
    level:   usize,
    /// The `id` attribute of the dropped element, when it has one.
    element: Option<String>,
    /// Leading markup of the dropped element, for the log.
    snippet: String,
  },

  /// A table of contents staged by an earlier pass was empty.
  EmptyStagedToc { name: String },

  /// A table of contents staged by an earlier pass had no markup to rewrite.
  UnparsableStagedToc { name: String },
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingHeader {
        level,
        element,
        snippet,
      } => {
        write!(
          f,
          "No header for a sect{level} section {}: {snippet}",
          element.as_deref().unwrap_or("<no id>")
        )
      },
      Self::EmptyStagedToc { name } => {
        write!(f, "Staged table of contents `{name}` is empty, keeping it as is")
      },
      Self::UnparsableStagedToc { name } => {
        write!(
          f,
          "Staged table of contents `{name}` has no markup, keeping it as is"
        )
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leaf(id: &str) -> Section {
    Section::new(id, id.to_uppercase(), String::new(), Vec::new())
  }

  #[test]
  fn test_section_id_is_normalized() {
    let section = leaf("__getting_started");
    assert_eq!(section.id(), "getting_started");
    assert_eq!(section.output_name(), "getting_started.html");
  }

  #[test]
  fn test_walk_is_pre_order() {
    let tree = Section::new(
      "a",
      "A".into(),
      String::new(),
      vec![
        Section::new("b", "B".into(), String::new(), vec![leaf("c")]),
        leaf("d"),
      ],
    );

    let ids: Vec<_> = tree.walk().map(Section::id).collect();
    assert_eq!(ids, ["a", "b", "c", "d"]);
  }

  #[test]
  fn test_page_ref() {
    let mut info = DocumentInfo::new("guide");
    info.multipage_ref = "/docs/".into();
    assert_eq!(info.page_ref("intro"), "/docs/guide/intro");
    assert_eq!(info.page_ref("intro#_setup"), "/docs/guide/intro#_setup");
    assert_eq!(info.toc_file_name(), "guide.toc.html");
  }

  #[test]
  fn test_page_level_is_at_least_one() {
    let mut info = DocumentInfo::new("guide");
    info.multipage_level = 0;
    assert_eq!(info.page_level(), 1);
    info.multipage_level = 3;
    assert_eq!(info.page_level(), 3);
  }
}
