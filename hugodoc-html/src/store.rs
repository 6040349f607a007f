//! Staging area for generated files.
//!
//! Passes stage named content here while a document is processed, later
//! passes may read back what earlier ones staged, and everything is written
//! out in one go by [`ContentStore::flush`]. Nothing reaches the disk unless
//! the whole document went through the pipeline.
use std::{
  fs,
  path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};

/// Location of a staged file relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
  pub folder: Option<String>,
  pub name:   String,
}

impl ContentKey {
  #[must_use]
  pub fn new(folder: Option<&str>, name: &str) -> Self {
    Self {
      folder: folder.map(str::to_string),
      name:   name.to_string(),
    }
  }

  /// Full path of the file below `destination`.
  #[must_use]
  pub fn path(&self, destination: &Path) -> PathBuf {
    match &self.folder {
      Some(folder) => destination.join(folder).join(&self.name),
      None => destination.join(&self.name),
    }
  }
}

/// Insertion-ordered collection of staged files.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
  entries: IndexMap<ContentKey, String>,
}

impl ContentStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Stage `content` as `name`, optionally inside `folder`.
  ///
  /// Staging the same key again replaces the content but keeps the position
  /// the key was first staged at.
  pub fn add(
    &mut self,
    folder: Option<&str>,
    name: &str,
    content: impl Into<String>,
  ) {
    self
      .entries
      .insert(ContentKey::new(folder, name), content.into());
  }

  /// Content staged under the given key, if any.
  #[must_use]
  pub fn get(&self, folder: Option<&str>, name: &str) -> Option<&str> {
    self
      .entries
      .get(&ContentKey::new(folder, name))
      .map(String::as_str)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Staged entries in flush order.
  pub fn iter(&self) -> impl Iterator<Item = (&ContentKey, &str)> {
    self
      .entries
      .iter()
      .map(|(key, content)| (key, content.as_str()))
  }

  /// Write every staged file below `destination`, creating directories as
  /// needed, and return how many files were written.
  ///
  /// # Errors
  ///
  /// The first directory or file that cannot be written aborts the flush.
  /// Files written before the failing one stay on disk.
  pub fn flush(self, destination: &Path) -> Result<usize> {
    let count = self.entries.len();
    for (key, content) in self.entries {
      let path = key.path(destination);
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| {
          Error::CreateDir {
            path: parent.to_path_buf(),
            source,
          }
        })?;
      }
      fs::write(&path, content)
        .map_err(|source| Error::Write { path: path.clone(), source })?;
      debug!("Wrote {}", path.display());
    }
    Ok(count)
  }
}
