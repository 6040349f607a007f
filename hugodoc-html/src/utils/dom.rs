//! Small helpers over `kuchikikiki` covering the DOM operations the passes
//! need: parsing a body fragment, selecting, class and attribute edits, and
//! serialization back to HTML.
use kuchikikiki::{NodeRef, parse_html};
use log::error;
use markup5ever::{LocalName, local_name};
use tendril::TendrilSink;

use super::collapse_whitespace;

/// Parse an HTML body fragment into a full document tree.
#[must_use]
pub fn parse_document(html: &str) -> NodeRef {
  parse_html().one(html)
}

/// The `<body>` element of a parsed document.
#[must_use]
pub fn body(document: &NodeRef) -> Option<NodeRef> {
  select_first(document, "body")
}

/// Serialized children of `<body>`, i.e. the fragment that was parsed.
#[must_use]
pub fn body_html(document: &NodeRef) -> String {
  body(document).map_or_else(|| outer_html(document), |body| inner_html(&body))
}

/// All elements matching `selector`, in document order. The node itself is
/// included when it matches.
///
/// An invalid selector is logged and matches nothing.
#[must_use]
pub fn select(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
  root.select(selector).map_or_else(
    |()| {
      error!("Invalid selector `{selector}`");
      Vec::new()
    },
    |matches| matches.map(|found| found.as_node().clone()).collect(),
  )
}

/// First element matching `selector`.
#[must_use]
pub fn select_first(root: &NodeRef, selector: &str) -> Option<NodeRef> {
  root
    .select_first(selector)
    .ok()
    .map(|found| found.as_node().clone())
}

/// The node and its subtree as HTML.
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
  let mut out = Vec::new();
  if let Err(e) = node.serialize(&mut out) {
    error!("Failed to serialize HTML node: {e}");
  }
  String::from_utf8(out).unwrap_or_default()
}

/// The node's children as HTML.
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
  node.children().map(|child| outer_html(&child)).collect()
}

/// Text content with whitespace collapsed.
#[must_use]
pub fn text(node: &NodeRef) -> String {
  collapse_whitespace(&node.text_contents())
}

#[must_use]
pub fn attr<N: Into<LocalName>>(node: &NodeRef, name: N) -> Option<String> {
  node
    .as_element()
    .and_then(|element| element.attributes.borrow().get(name).map(str::to_string))
}

pub fn set_attr<N: Into<LocalName>>(node: &NodeRef, name: N, value: &str) {
  if let Some(element) = node.as_element() {
    element
      .attributes
      .borrow_mut()
      .insert(name, value.to_string());
  }
}

/// The `id` attribute, if present and not empty.
#[must_use]
pub fn id(node: &NodeRef) -> Option<String> {
  attr(node, local_name!("id")).filter(|id| !id.is_empty())
}

#[must_use]
pub fn has_class(node: &NodeRef, class: &str) -> bool {
  attr(node, local_name!("class"))
    .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

pub fn add_class(node: &NodeRef, class: &str) {
  if has_class(node, class) {
    return;
  }
  let classes = match attr(node, local_name!("class")) {
    Some(existing) if !existing.trim().is_empty() => {
      format!("{} {class}", existing.trim())
    },
    _ => class.to_string(),
  };
  set_attr(node, local_name!("class"), &classes);
}

pub fn remove_class(node: &NodeRef, class: &str) {
  let Some(existing) = attr(node, local_name!("class")) else {
    return;
  };
  let remaining = existing
    .split_whitespace()
    .filter(|c| *c != class)
    .collect::<Vec<_>>()
    .join(" ");
  set_attr(node, local_name!("class"), &remaining);
}

/// Whether the node is an element with the given local tag name.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
  node
    .as_element()
    .is_some_and(|element| &*element.name.local == tag)
}

/// Element children, skipping text and comments.
pub fn element_children(node: &NodeRef) -> impl Iterator<Item = NodeRef> {
  node.children().filter(|child| child.as_element().is_some())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_fragment_round_trips_through_body() {
    let html = r#"<div class="sect1"><h2 id="_a">A</h2><p>text</p></div>"#;
    let document = parse_document(html);
    assert_eq!(body_html(&document), html);
  }

  #[test]
  fn test_class_edits() {
    let document = parse_document(r#"<i class="icon-note big"></i>"#);
    let icon = select_first(&document, "i").expect("icon element");

    assert!(has_class(&icon, "icon-note"));
    remove_class(&icon, "icon-note");
    add_class(&icon, "fa-info-circle");
    add_class(&icon, "fa-info-circle");

    assert!(!has_class(&icon, "icon-note"));
    assert_eq!(attr(&icon, "class").as_deref(), Some("big fa-info-circle"));
  }

  #[test]
  fn test_add_class_without_existing_attribute() {
    let document = parse_document("<ul><li>x</li></ul>");
    let list = select_first(&document, "ul").expect("list element");
    add_class(&list, "nav");
    assert_eq!(outer_html(&list), r#"<ul class="nav"><li>x</li></ul>"#);
  }

  #[test]
  fn test_invalid_selector_matches_nothing() {
    let document = parse_document("<p>x</p>");
    assert!(select(&document, "p[").is_empty());
  }

  #[test]
  fn test_element_children_and_text() {
    let document =
      parse_document("<div>lead <h2> 1.  Intro </h2><p>body</p></div>");
    let div = select_first(&document, "div").expect("div element");
    let children: Vec<_> = element_children(&div).collect();

    assert_eq!(children.len(), 2);
    assert!(is_tag(&children[0], "h2"));
    assert_eq!(text(&children[0]), "1. Intro");
    assert_eq!(id(&children[0]), None);
  }
}
