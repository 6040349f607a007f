//! Page emission and the replacement top-level page.
use super::sections::section_list;
use crate::{
  store::ContentStore,
  types::{DocumentInfo, Section},
};

/// Stage one page per section, parents before their children, inside the
/// document's folder. Returns the number of pages staged.
pub fn emit_pages(
  info: &DocumentInfo,
  store: &mut ContentStore,
  sections: &[Section],
) -> usize {
  let folder = Some(info.document_name.as_str());
  let mut staged = 0;
  for section in sections.iter().flat_map(Section::walk) {
    store.add(folder, &section.output_name(), section.content());
    staged += 1;
  }
  staged
}

/// Body that replaces the monolithic document: the preamble, if one is
/// still there, followed by links to the top-level sections.
#[must_use]
pub fn index_page(
  info: &DocumentInfo,
  preamble: Option<&str>,
  sections: &[Section],
) -> String {
  let list = section_list(info, sections);
  match preamble {
    Some(preamble) => format!("{preamble}\n{list}"),
    None => list,
  }
}
