//! The text passes that run around the multipage split.
use log::debug;

use super::types::{ContentProcessor, ProcessorContext};
use crate::utils::dom;

/// Admonition icon classes and their Font Awesome replacements.
const ICON_REPLACEMENTS: [(&str, &str); 5] = [
  ("icon-tip", "fa-lightbulb-o"),
  ("icon-note", "fa-info-circle"),
  ("icon-important", "fa-exclamation-circle"),
  ("icon-warning", "fa-exclamation-triangle"),
  ("icon-caution", "fa-exclamation-triangle"),
];

/// Moves the backend's `div#toc` out of the body into its own staged file,
/// tagged with the navigation classes the site theme expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocExtractor;

impl ContentProcessor for TocExtractor {
  fn name(&self) -> &'static str {
    "toc"
  }

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String {
    let document = dom::parse_document(content);
    let Some(toc) = dom::select_first(&document, "div#toc.toc") else {
      return content.to_string();
    };

    for list in dom::select(&toc, "ul") {
      dom::add_class(&list, "nav");
    }
    for link in dom::select(&toc, "a") {
      dom::add_class(&link, "nav-link");
    }
    dom::add_class(&toc, "toc-side");

    let html = dom::outer_html(&toc);
    toc.detach();

    let name = context.info().toc_file_name();
    debug!("Staging table of contents as {name}");
    context.store_mut().add(None, &name, html);
    dom::body_html(&document)
  }
}

/// Swaps admonition icon classes for Font Awesome ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontAwesomeIcons;

impl ContentProcessor for FontAwesomeIcons {
  fn name(&self) -> &'static str {
    "font-awesome"
  }

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String {
    if !context.info().font_awesome_icons {
      return content.to_string();
    }

    let document = dom::parse_document(content);
    for (icon, replacement) in ICON_REPLACEMENTS {
      for element in dom::select(&document, &format!(".{icon}")) {
        dom::remove_class(&element, icon);
        dom::add_class(&element, replacement);
        dom::add_class(&element, "fa-2x");
      }
    }
    dom::body_html(&document)
  }
}

/// Small markup fixups: code blocks get their `data-lang` as a class for the
/// highlighter, and the preamble is dropped unless it should be kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlContentFixups;

impl ContentProcessor for HtmlContentFixups {
  fn name(&self) -> &'static str {
    "html-content"
  }

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String {
    let document = dom::parse_document(content);

    for code in dom::select(&document, "code") {
      if let Some(lang) = dom::attr(&code, "data-lang")
        .filter(|lang| !lang.is_empty())
      {
        dom::add_class(&code, &lang);
      }
    }

    if !context.info().keep_preamble {
      for preamble in dom::select(&document, "div#preamble") {
        preamble.detach();
      }
    }

    dom::body_html(&document)
  }
}

/// Prepends the document's front matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatter;

impl ContentProcessor for FrontMatter {
  fn name(&self) -> &'static str {
    "front-matter"
  }

  fn process(&self, context: &mut ProcessorContext, content: &str) -> String {
    format!("{}{content}", context.info().header)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;
  use crate::types::DocumentInfo;

  const TOC_BODY: &str = concat!(
    r#"<div id="toc" class="toc"><div id="toctitle">Contents</div>"#,
    r##"<ul class="sectlevel1"><li><a href="#_intro">Intro</a></li></ul></div>"##,
    r#"<div class="sect1"><h2 id="_intro">Intro</h2></div>"#,
  );

  #[test]
  fn test_toc_is_moved_into_the_store() {
    let mut context = ProcessorContext::new(DocumentInfo::new("guide"));

    let body = TocExtractor.process(&mut context, TOC_BODY);

    assert_eq!(body, r#"<div class="sect1"><h2 id="_intro">Intro</h2></div>"#);
    let toc = context
      .store()
      .get(None, "guide.toc.html")
      .expect("staged toc");
    assert!(toc.contains(r#"class="toc toc-side""#));
    assert!(toc.contains(r#"<div id="toctitle">Contents</div>"#));
    assert!(toc.contains(r#"<ul class="sectlevel1 nav">"#));
    assert!(toc.contains(r##"<a href="#_intro" class="nav-link">Intro</a>"##));
  }

  #[test]
  fn test_body_without_toc_is_unchanged() {
    let mut context = ProcessorContext::new(DocumentInfo::new("guide"));
    let body = "<p>no   toc</p>\n";

    assert_eq!(TocExtractor.process(&mut context, body), body);
    assert!(context.store().is_empty());
  }

  #[test]
  fn test_icons_are_replaced() {
    let mut context = ProcessorContext::new(DocumentInfo::new("guide"));

    let body = FontAwesomeIcons.process(
      &mut context,
      r#"<i class="fa icon-note" title="Note"></i><i class="fa icon-caution"></i>"#,
    );

    assert_eq!(
      body,
      concat!(
        r#"<i class="fa fa-info-circle fa-2x" title="Note"></i>"#,
        r#"<i class="fa fa-exclamation-triangle fa-2x"></i>"#,
      )
    );
  }

  #[test]
  fn test_icons_can_be_disabled() {
    let mut info = DocumentInfo::new("guide");
    info.font_awesome_icons = false;
    let mut context = ProcessorContext::new(info);
    let body = r#"<i class="fa icon-note"></i>"#;

    assert_eq!(FontAwesomeIcons.process(&mut context, body), body);
  }

  #[test]
  fn test_code_language_and_preamble() {
    let mut context = ProcessorContext::new(DocumentInfo::new("guide"));

    let body = HtmlContentFixups.process(
      &mut context,
      concat!(
        r#"<div id="preamble"><p>lead</p></div>"#,
        r#"<pre><code class="language-java" data-lang="java">x</code></pre>"#,
        r#"<code data-lang="">y</code>"#,
      ),
    );

    assert_eq!(
      body,
      concat!(
        r#"<pre><code class="language-java java" data-lang="java">x</code></pre>"#,
        r#"<code data-lang="">y</code>"#,
      )
    );
  }

  #[test]
  fn test_preamble_can_be_kept() {
    let mut info = DocumentInfo::new("guide");
    info.keep_preamble = true;
    let mut context = ProcessorContext::new(info);

    let body = HtmlContentFixups
      .process(&mut context, r#"<div id="preamble"><p>lead</p></div>"#);

    assert_eq!(body, r#"<div id="preamble"><p>lead</p></div>"#);
  }

  #[test]
  fn test_front_matter_is_prepended() {
    let mut info = DocumentInfo::new("guide");
    info.header = "---\ntitle: Guide\n---\n".into();
    let mut context = ProcessorContext::new(info);

    assert_eq!(
      FrontMatter.process(&mut context, "<ul></ul>"),
      "---\ntitle: Guide\n---\n<ul></ul>"
    );
  }
}
