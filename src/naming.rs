//! Page id derivation from source paths.
//!
//! Every source file gets a page id: its path relative to the source root,
//! `/`-joined, with the source extension stripped. The id is the graph key
//! and the basis of the output URL.
//!
//! ## Examples
//!
//! With source root `site/example.com/` and extension `.html`:
//! - `site/example.com/index.html` → `index` (the root page, no parent)
//! - `site/example.com/news.html` → `news` (parent `index`)
//! - `site/example.com/news/2019/10_06.html` → `news/2019/10_06` (parent `news/2019`)

use std::path::{Component, Path};

/// Id of the single root page.
pub const ROOT_ID: &str = "index";

/// Structural facts about a page id, derived without reading the file.
#[derive(Debug, Clone, PartialEq)]
pub struct PageName {
    /// Slash-separated id, e.g. `news/item`.
    pub id: String,
    /// The id split on `/`.
    pub path: Vec<String>,
    /// Last path segment.
    pub filename: String,
    /// Segment count minus one. Top-level pages and the root are depth 0.
    pub depth: usize,
    /// `None` for the root, `index` for top-level pages, otherwise the id
    /// with its last segment dropped.
    pub parent: Option<String>,
}

/// Derive a page id from `file` relative to `root`, dropping `extension`.
///
/// Returns `None` when `file` is not under `root` or the remaining relative
/// path is empty.
///
/// - root `/site/foo`, file `/site/foo/news/item.html` → `Some("news/item")`
/// - root `./site`, file `./site/index.html` → `Some("index")`
pub fn page_id(file: &Path, root: &Path, extension: &str) -> Option<String> {
    let rel = file.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        return None;
    }
    let joined = segments.join("/");
    let id = joined.strip_suffix(extension).unwrap_or(&joined);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Split a page id into its structural parts.
pub fn parse_page_id(id: &str) -> PageName {
    let path: Vec<String> = id.split('/').map(str::to_string).collect();
    let depth = path.len() - 1;
    let filename = path.last().cloned().unwrap_or_default();
    let parent = if id == ROOT_ID {
        None
    } else if depth == 0 {
        Some(ROOT_ID.to_string())
    } else {
        id.rfind('/').map(|i| id[..i].to_string())
    };
    PageName {
        id: id.to_string(),
        path,
        filename,
        depth,
        parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nested_file_id() {
        let id = page_id(
            Path::new("/site/foo/news/item.html"),
            Path::new("/site/foo"),
            ".html",
        );
        assert_eq!(id.as_deref(), Some("news/item"));
    }

    #[test]
    fn relative_root_with_dot_prefix() {
        let id = page_id(Path::new("./site/index.html"), Path::new("./site"), ".html");
        assert_eq!(id.as_deref(), Some("index"));
    }

    #[test]
    fn trailing_slash_on_root() {
        let root = PathBuf::from("/site/foo/");
        let id = page_id(Path::new("/site/foo/about.html"), &root, ".html");
        assert_eq!(id.as_deref(), Some("about"));
    }

    #[test]
    fn only_the_configured_extension_is_stripped() {
        let id = page_id(
            Path::new("/s/notes.v2.html"),
            Path::new("/s"),
            ".html",
        );
        assert_eq!(id.as_deref(), Some("notes.v2"));
    }

    #[test]
    fn file_outside_root_has_no_id() {
        assert_eq!(
            page_id(Path::new("/other/a.html"), Path::new("/site"), ".html"),
            None
        );
    }

    #[test]
    fn root_page_has_no_parent() {
        let n = parse_page_id("index");
        assert_eq!(n.parent, None);
        assert_eq!(n.depth, 0);
        assert_eq!(n.filename, "index");
    }

    #[test]
    fn top_level_page_parent_is_index() {
        let n = parse_page_id("news");
        assert_eq!(n.parent.as_deref(), Some("index"));
        assert_eq!(n.depth, 0);
        assert_eq!(n.path, vec!["news"]);
    }

    #[test]
    fn nested_page_parent_drops_last_segment() {
        let n = parse_page_id("news/2019/10_06");
        assert_eq!(n.parent.as_deref(), Some("news/2019"));
        assert_eq!(n.depth, 2);
        assert_eq!(n.filename, "10_06");
        assert_eq!(n.path, vec!["news", "2019", "10_06"]);
    }

    #[test]
    fn nested_index_is_an_ordinary_page() {
        let n = parse_page_id("news/index");
        assert_eq!(n.parent.as_deref(), Some("news"));
        assert_eq!(n.depth, 1);
    }
}
