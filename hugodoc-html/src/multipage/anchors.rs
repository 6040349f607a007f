//! Rewriting of in-document links.
//!
//! Once sections live on their own pages a plain `#id` link only works when
//! the target happens to be on the same page. Every fragment link is turned
//! into a reference to the page that ends up holding its target.
use std::collections::HashMap;

use kuchikikiki::NodeRef;
use log::debug;
use markup5ever::local_name;

use super::sections::header_id;
use crate::{
  types::DocumentInfo,
  utils::{dom, normalize_id},
};

/// Maps fragment links onto generated pages.
///
/// The source document is only read. Rewrites happen on copies so that the
/// tree stays intact for every later lookup.
pub struct AnchorRewriter<'a> {
  info:    &'a DocumentInfo,
  targets: HashMap<String, NodeRef>,
}

impl<'a> AnchorRewriter<'a> {
  /// Index every element id of `document`. When an id occurs more than once
  /// the first element wins.
  #[must_use]
  pub fn new(info: &'a DocumentInfo, document: &NodeRef) -> Self {
    let mut targets = HashMap::new();
    for node in document.descendants() {
      if let Some(id) = dom::id(&node) {
        targets.entry(id).or_insert(node);
      }
    }
    Self { info, targets }
  }

  /// Normalized id of the page that will hold the element `raw_id`.
  ///
  /// Levels are tried from the deepest page level up to `sect1`; for each,
  /// the closest enclosing `sect{N}` with a heading is the page.
  #[must_use]
  pub fn page_of(&self, raw_id: &str) -> Option<String> {
    let target = self.targets.get(raw_id)?;
    (1..=self.info.page_level()).rev().find_map(|level| {
      let class = format!("sect{level}");
      target
        .ancestors()
        .filter(|ancestor| dom::has_class(ancestor, &class))
        .find_map(|ancestor| header_id(&ancestor, level))
        .map(|id| normalize_id(&id).to_string())
    })
  }

  /// Reference path (below the document folder) for a `#raw_id` link.
  #[must_use]
  pub fn resolve(&self, raw_id: &str) -> String {
    let id = normalize_id(raw_id);
    match self.page_of(raw_id) {
      Some(page) if page != id => format!("{page}#{raw_id}"),
      Some(_) => id.to_string(),
      None => {
        debug!("No page found for `#{raw_id}`, keeping it on the current page");
        id.to_string()
      },
    }
  }

  /// Copy of `element` as HTML with its fragment links rewritten.
  #[must_use]
  pub fn rewrite_element(&self, element: &NodeRef) -> String {
    let copy = dom::parse_document(&dom::outer_html(element));
    self.rewrite_in_place(&copy, false);
    dom::body_html(&copy)
  }

  /// Rewrite the fragment links of a tree that is not the source document,
  /// e.g. a re-parsed table of contents.
  ///
  /// Links carrying the `anchor` class point at their own heading and are
  /// left alone, as are links that do not start with `#`. With `assign_id`
  /// every rewritten link also gets the resolved path as its own id.
  pub fn rewrite_in_place(&self, fragment: &NodeRef, assign_id: bool) {
    for link in dom::select(fragment, "a:not(.anchor)") {
      let Some(raw_id) = dom::attr(&link, local_name!("href"))
        .and_then(|href| href.strip_prefix('#').map(str::to_string))
      else {
        continue;
      };

      let target = self.resolve(&raw_id);
      dom::set_attr(&link, local_name!("href"), &self.info.page_ref(&target));
      if assign_id {
        dom::set_attr(&link, local_name!("id"), &target);
      }
    }
  }
}
