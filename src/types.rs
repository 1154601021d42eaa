//! The site graph data model shared by every stage.
//!
//! Pages live in a single arena owned by [`Site`]. Every relation between
//! pages (parent, children, siblings, ancestors, tag and date buckets) is
//! stored as a page id, never as a reference, so the graph has no ownership
//! cycles and serializes directly into the scan manifest.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::naming::ROOT_ID;

/// A page date with the year and month tokens used by the date index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDate {
    pub date: NaiveDate,
    /// Four-digit year, e.g. `"2024"`.
    pub year: String,
    /// Two-digit month, e.g. `"03"`.
    pub month: String,
}

impl From<NaiveDate> for PageDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            date,
            year: format!("{:04}", date.year()),
            month: format!("{:02}", date.month()),
        }
    }
}

/// One page, parsed from one source file.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Slash-separated id derived from the source path (`news/item`).
    pub id: String,
    /// `id` split on `/`.
    pub path: Vec<String>,
    /// Last segment of `path`.
    pub filename: String,
    pub depth: usize,
    /// Parent page id. `None` only for the root page.
    pub parent: Option<String>,
    /// Title from the header, or `filename` when the header has none.
    pub title: String,
    /// Every header field without typed handling, verbatim.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Normalized tags. Never empty: untagged pages carry `"untagged"`.
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PageDate>,
    /// Order as written in the header (0 when absent).
    pub declared_order: i64,
    /// Navigation rank after resolution. Zero until the orderer has run.
    pub order: i64,
    pub children: Vec<String>,
    pub siblings: Vec<String>,
    /// Root-first chain of ids from `index` down to the direct parent.
    pub ancestors: Vec<String>,
    /// HTML body with macros expanded.
    pub body: String,
    /// Source file path relative to the source root.
    pub source_path: String,
}

impl Page {
    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    /// Look up a free-form header field.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Year → month → page ids.
pub type DateHierarchy = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// The finished site graph.
///
/// Built once by [`crate::build_site`] and read-only afterwards: there are no
/// mutating accessors, so a `&Site` can be handed to any number of consumers.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    /// Title of the `index` page.
    pub name: String,
    /// Final path segment of the source root directory.
    pub output_root_name: String,
    /// Renderers append `.html` to internal links.
    pub append_html: bool,
    /// Pages in discovery order.
    pages: Vec<Page>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    /// Normalized tag → ids of the pages carrying it, in discovery order.
    pub tags: BTreeMap<String, Vec<String>>,
    pub date_hierarchy: DateHierarchy,
}

impl Site {
    pub(crate) fn new(
        output_root_name: String,
        pages: Vec<Page>,
        tags: BTreeMap<String, Vec<String>>,
        date_hierarchy: DateHierarchy,
    ) -> Self {
        let index: HashMap<String, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.id.clone(), i))
            .collect();
        let name = index
            .get(ROOT_ID)
            .map(|&i| pages[i].title.clone())
            .unwrap_or_default();
        Self {
            name,
            output_root_name,
            append_html: false,
            pages,
            index,
            tags,
            date_hierarchy,
        }
    }

    /// Look up a page by id.
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.index.get(id).map(|&i| &self.pages[i])
    }

    /// The root page.
    pub fn root(&self) -> Option<&Page> {
        self.page(ROOT_ID)
    }

    /// All pages in discovery order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Resolve a list of ids (children, siblings, a tag bucket) to pages.
    /// Unknown ids are skipped.
    pub fn resolve<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a Page> + 'a {
        ids.iter().filter_map(|id| self.page(id))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
