//! Page record parsing.
//!
//! A source file is a metadata header, the configured split sequence, and an
//! HTML body:
//!
//! ```text
//! title: Autumn news
//! tags: News, Local Events
//! date: 2024-03-15
//! order: -1
//! author: Jo
//! -----
//! <p>Read {{link("/archive","the archive")}}.</p>
//! ```
//!
//! Header lines are `name: value`. `tags`, `date` and `order` get typed
//! handling, `title` is pulled out as a member, and every other field is kept
//! verbatim in [`Page::attributes`] for templates. When a field repeats, the
//! last line wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::macros;
use crate::naming::{self, PageName};
use crate::types::{Page, PageDate};

/// Tag assigned to pages that declare none.
pub const UNTAGGED: &str = "untagged";

/// Calendar format of the `date` header field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Split sequence \"{delimiter}\" missing from file {path}")]
    MalformedSourceFile { path: PathBuf, delimiter: String },
    #[error("Header line {line} of {path} has no ':' separator")]
    MalformedMetadataLine { path: PathBuf, line: usize },
    #[error("Invalid date \"{value}\" in {path} (expected YYYY-MM-DD)")]
    InvalidDateFormat { path: PathBuf, value: String },
    #[error("Invalid order \"{value}\" in {path} (expected an integer)")]
    InvalidOrderValue { path: PathBuf, value: String },
    #[error("Cannot derive a page id for {path} (outside the source root or no file stem)")]
    InvalidPagePath { path: PathBuf },
}

/// Read and parse one source file under `root`.
pub fn parse_page(path: &Path, root: &Path, config: &SiteConfig) -> Result<Page, ParseError> {
    let id = naming::page_id(path, root, &config.source_extension).ok_or_else(|| {
        ParseError::InvalidPagePath {
            path: path.to_path_buf(),
        }
    })?;
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rel = path.strip_prefix(root).unwrap_or(path);
    tracing::debug!(id = %id, path = %path.display(), "Loading page");
    parse_source(&id, rel, &content, &config.split_sequence)
}

/// Parse source text for the page `id`. `source_path` is only used in the
/// page record and in error messages.
pub fn parse_source(
    id: &str,
    source_path: &Path,
    content: &str,
    delimiter: &str,
) -> Result<Page, ParseError> {
    let Some((header, body)) = content.split_once(delimiter) else {
        return Err(ParseError::MalformedSourceFile {
            path: source_path.to_path_buf(),
            delimiter: delimiter.to_string(),
        });
    };

    let PageName {
        id,
        path,
        filename,
        depth,
        parent,
    } = naming::parse_page_id(id);

    let mut title = None;
    let mut tags = vec![UNTAGGED.to_string()];
    let mut date = None;
    let mut declared_order = 0;
    let mut attributes = BTreeMap::new();

    for (n, line) in header.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::MalformedMetadataLine {
                path: source_path.to_path_buf(),
                line: n + 1,
            });
        };
        let value = value.trim();
        match name {
            "tags" => tags = parse_tags(value),
            "date" => date = Some(parse_date(value, source_path)?),
            "order" => declared_order = parse_order(value, source_path)?,
            "title" => title = Some(value.to_string()),
            _ => {
                attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    tracing::debug!(
        id = %id,
        depth,
        parent = ?parent,
        tags = ?tags,
        "Parsed page header"
    );

    Ok(Page {
        title: title.unwrap_or_else(|| filename.clone()),
        id,
        path,
        filename,
        depth,
        parent,
        attributes,
        tags,
        date,
        declared_order,
        order: 0,
        children: Vec::new(),
        siblings: Vec::new(),
        ancestors: Vec::new(),
        body: macros::expand(body),
        source_path: source_path.to_string_lossy().into_owned(),
    })
}

/// Normalize a tag: trimmed, lower-cased, spaces become underscores.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace(' ', "_").to_lowercase()
}

/// Split a comma-separated `tags` value into normalized, unique tags.
///
/// Falls back to `["untagged"]` when nothing usable remains.
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(normalize_tag) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    if tags.is_empty() {
        tags.push(UNTAGGED.to_string());
    }
    tags
}

fn parse_date(value: &str, path: &Path) -> Result<PageDate, ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(PageDate::from)
        .map_err(|_| ParseError::InvalidDateFormat {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}

fn parse_order(value: &str, path: &Path) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidOrderValue {
        path: path.to_path_buf(),
        value: value.to_string(),
    })
}
