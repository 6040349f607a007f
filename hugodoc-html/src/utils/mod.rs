pub mod dom;

use std::borrow::Cow;

/// Strip the leading underscores the HTML backend puts in front of generated
/// anchor ids.
///
/// The result is the single identity of a section: page names, references
/// and table of contents entries are all derived from it.
///
/// ```
/// use hugodoc_html::utils::normalize_id;
///
/// assert_eq!(normalize_id("_getting_started"), "getting_started");
/// assert_eq!(normalize_id("explicit-id"), "explicit-id");
/// ```
#[must_use]
pub fn normalize_id(raw: &str) -> &str {
  raw.trim_start_matches('_')
}

/// Drop a leading chapter number such as `3. ` from a heading.
///
/// Everything up to and including the first `". "` goes away, which is what
/// numbered section titles look like.
#[must_use]
pub fn strip_chapter_number(title: &str) -> &str {
  title
    .find(". ")
    .map_or(title, |position| &title[position + 2..])
}

/// Collapse runs of whitespace into single spaces and trim the ends, the way
/// heading text reads in a browser.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use between tags.
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
  html_escape::encode_text(text)
}

/// Escape text for use inside a double-quoted attribute value.
#[must_use]
pub fn escape_attribute(text: &str) -> Cow<'_, str> {
  html_escape::encode_double_quoted_attribute(text)
}
