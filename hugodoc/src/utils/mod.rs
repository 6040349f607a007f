pub mod output;

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use log::{trace, warn};
use walkdir::WalkDir;

pub use crate::utils::output::{DocumentReport, process_documents};

/// A compiled HTML document queued for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDocument {
  /// File stem, used for the page folder and the output file names.
  pub name: String,
  pub path: PathBuf,
}

/// Collect all HTML files below `dir`, sorted for deterministic output.
pub fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .map(walkdir::DirEntry::into_path)
    .filter(|path| {
      path.is_file() && path.extension().is_some_and(|ext| ext == "html")
    })
    .collect();
  files.sort();

  trace!("Found {} HTML files in {}", files.len(), dir.display());
  files
}

/// Resolve the command line inputs into documents.
///
/// Files are taken as given, directories are searched for `*.html`. Each
/// document name may only appear once since the outputs of two documents
/// with the same name would overwrite each other; later duplicates are
/// skipped with a warning.
pub fn collect_documents(inputs: &[PathBuf]) -> Vec<InputDocument> {
  let mut seen: HashMap<String, PathBuf> = HashMap::new();
  let mut documents = Vec::new();

  let paths = inputs.iter().flat_map(|input| {
    if input.is_dir() {
      collect_html_files(input)
    } else {
      vec![input.clone()]
    }
  });

  for path in paths {
    let Some(name) = document_name(&path) else {
      warn!("Skipping {}: no usable file name", path.display());
      continue;
    };
    if let Some(first) = seen.get(&name) {
      warn!(
        "Skipping {}: document `{name}` was already read from {}",
        path.display(),
        first.display()
      );
      continue;
    }
    seen.insert(name.clone(), path.clone());
    documents.push(InputDocument { name, path });
  }

  documents
}

/// Name of the document stored at `path`: its file stem.
#[must_use]
pub fn document_name(path: &Path) -> Option<String> {
  path
    .file_stem()
    .and_then(|stem| stem.to_str())
    .filter(|stem| !stem.is_empty())
    .map(str::to_string)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_document_name_is_file_stem() {
    assert_eq!(
      document_name(Path::new("out/dflib.html")),
      Some("dflib".to_string())
    );
    assert_eq!(document_name(Path::new("/")), None);
  }

  #[test]
  fn test_directories_are_walked_for_html() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("b.html"), "").unwrap();
    fs::write(dir.path().join("nested/a.html"), "").unwrap();
    fs::write(dir.path().join("notes.txt"), "").unwrap();

    let names: Vec<_> = collect_documents(&[dir.path().to_path_buf()])
      .into_iter()
      .map(|document| document.name)
      .collect();

    assert_eq!(names, ["b", "a"]);
  }

  #[test]
  fn test_duplicate_names_are_skipped() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("v2")).unwrap();
    fs::write(dir.path().join("guide.html"), "").unwrap();
    fs::write(dir.path().join("v2/guide.html"), "").unwrap();

    let documents = collect_documents(&[
      dir.path().join("guide.html"),
      dir.path().join("v2"),
    ]);

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].path, dir.path().join("guide.html"));
  }
}
