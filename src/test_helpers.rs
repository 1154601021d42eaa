//! Shared test utilities.
//!
//! Builds pages and sites from inline headers, copies the fixture tree into a
//! temp directory, and looks pages up with clear panics on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = site_from(&[
//!     ("index", "title: Home"),
//!     ("news", "title: News\ntags: A, b"),
//! ]);
//! assert_eq!(find_page(&site, "news").parent.as_deref(), Some("index"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::parse::parse_source;
use crate::types::{Page, Site};

pub const DELIMITER: &str = "-----";

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a source file with `header`, the default delimiter and a small body.
/// Creates parent directories as needed.
pub fn write_page(root: &Path, rel: &str, header: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, format!("{header}\n{DELIMITER}\n<p>{rel}</p>\n")).unwrap();
}

// =========================================================================
// In-memory pages and sites
// =========================================================================

/// Parse a page with the given id from an inline header.
pub fn page(id: &str, header: &str) -> Page {
    let source = format!("{header}\n{DELIMITER}\n");
    parse_source(id, Path::new(&format!("{id}.html")), &source, DELIMITER)
        .unwrap_or_else(|e| panic!("fixture page '{id}' failed to parse: {e}"))
}

/// Link and order `(id, header)` pairs into a finished site.
pub fn site_from(pages: &[(&str, &str)]) -> Site {
    let pages = pages.iter().map(|(id, header)| page(id, header)).collect();
    crate::link_site("test.site".to_string(), pages).unwrap()
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a page by id. Panics if not found.
pub fn find_page<'a>(site: &'a Site, id: &str) -> &'a Page {
    site.page(id).unwrap_or_else(|| {
        let ids: Vec<&str> = site.pages().iter().map(|p| p.id.as_str()).collect();
        panic!("page '{id}' not found. Available: {ids:?}")
    })
}

/// Titles of the pages behind a list of ids, in list order.
pub fn titles<'a>(site: &'a Site, ids: &'a [String]) -> Vec<&'a str> {
    site.resolve(ids).map(|p| p.title.as_str()).collect()
}
