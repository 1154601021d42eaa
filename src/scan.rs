//! Source tree walking.
//!
//! Stage 1 of the build. Walks the source root and parses every source file
//! into a [`Page`], producing the raw page set in discovery order.
//!
//! ## Directory Structure
//!
//! ```text
//! example.com/                  # Source root (its name becomes the output root name)
//! ├── config.toml               # Optional configuration
//! ├── index.html                # Root page, required
//! ├── news.html                 # id "news", parent "index"
//! ├── news/
//! │   ├── 2024_spring.html      # id "news/2024_spring", parent "news"
//! │   └── photo.jpg             # Not a source file, ignored
//! └── drafts/
//!     ├── skip_rendering        # Marker: this whole subtree is skipped
//!     └── wip.html
//! ```
//!
//! ## Traversal
//!
//! Within a directory, files are visited before subdirectories and each group
//! in lexicographic file-name order. Discovery order, and with it every
//! order-dependent tie-break later on, is the same on every platform. The
//! walk keeps its own directory stack (`walkdir`), so deep trees do not grow
//! the call stack.
//!
//! A directory that directly contains an entry named `skip_rendering` is
//! pruned before any of its children are read; nothing beneath it is parsed.
//!
//! Symbolic links are followed, both to files and to directories. A link
//! that points back at one of its own ancestors fails the scan with
//! [`ScanError::Walk`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::config::SiteConfig;
use crate::naming::ROOT_ID;
use crate::parse::{self, ParseError};
use crate::types::Page;

/// Entry name that excludes the directory containing it.
pub const SKIP_MARKER: &str = "skip_rendering";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("index page not found in {0}")]
    MissingIndexPage(PathBuf),
}

/// Pages in discovery order, one per id.
#[derive(Debug, Default)]
pub struct PageSet {
    pages: Vec<Page>,
    slots: HashMap<String, usize>,
}

impl PageSet {
    /// Add a page. A page with the same id replaces the earlier one in its
    /// original slot.
    pub fn insert(&mut self, page: Page) {
        match self.slots.get(&page.id) {
            Some(&slot) => {
                tracing::warn!(
                    id = %page.id,
                    replaced = %self.pages[slot].source_path,
                    by = %page.source_path,
                    "Duplicate page id"
                );
                self.pages[slot] = page;
            }
            None => {
                self.slots.insert(page.id.clone(), self.pages.len());
                self.pages.push(page);
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

/// Walk `root` and parse every source file into the page set.
///
/// Fails on the first unreadable or malformed file, and with
/// [`ScanError::MissingIndexPage`] when no `index` page was found.
pub fn scan_pages(root: &Path, config: &SiteConfig) -> Result<PageSet, ScanError> {
    let mut pages = PageSet::default();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e));

    for entry in walker {
        let entry = entry?;
        if is_source_file(&entry, &config.source_extension) {
            pages.insert(parse::parse_page(entry.path(), root, config)?);
        }
    }

    if !pages.contains(ROOT_ID) {
        tracing::error!(root = %root.display(), "index page not parsed");
        return Err(ScanError::MissingIndexPage(root.to_path_buf()));
    }

    tracing::info!(root = %root.display(), pages = pages.len(), "Source tree scanned");
    Ok(pages)
}

/// Final path segment of the source root, used as the output root name.
pub fn output_root_name(root: &Path) -> Result<String, ScanError> {
    if let Some(name) = root.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    // `.` or `..` have no file name of their own
    let canonical = fs::canonicalize(root)?;
    Ok(canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default())
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let excluded = fs::symlink_metadata(entry.path().join(SKIP_MARKER)).is_ok();
    if excluded {
        tracing::debug!(dir = %entry.path().display(), "Skipping marked directory");
    }
    excluded
}

fn is_source_file(entry: &DirEntry, extension: &str) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name == extension {
        // nothing left to name the page after
        tracing::debug!(path = %entry.path().display(), "Skipping source file without a stem");
        return false;
    }
    name.ends_with(extension)
}
