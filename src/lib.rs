//! # sitegraph
//!
//! Turns a directory tree of source files into a linked, navigable site graph.
//! Each source file is a `field: value` metadata header, a split sequence, and
//! an HTML body. The directory layout is the page hierarchy.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan     source/     →  page set       (walk + parse + macro expansion)
//! 2. Link     page set    →  site graph     (parent/children, siblings, ancestors, tag + date indices)
//! 3. Order    site graph  →  Site           (resolved navigation ranks, sorted lists)
//! ```
//!
//! Each stage fully consumes the previous one before starting, and the first
//! error aborts the whole build. The finished [`Site`] is never mutated again,
//! so renderers can share it freely.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the source root, honours `skip_rendering`, collects pages |
//! | [`parse`] | Header/body split and typed header fields for one source file |
//! | [`macros`] | `{{link}}`, `{{image}}`, `{{imagehw}}` body directives |
//! | [`naming`] | Page id derivation: id, path segments, depth, parent |
//! | [`graph`] | Stage 2: links pages into a tree and builds tag/date indices |
//! | [`order`] | Stage 3: signed-offset order resolution and navigation sorting |
//! | [`types`] | The site graph data model (`Page`, `Site`) |
//! | [`paths`] | Bit-exact id → output path mapping and the output plan |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting for the finished graph |
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use sitegraph::{build_site, config::SiteConfig};
//!
//! let site = build_site(Path::new("site_data/example.com"), &SiteConfig::default())?;
//! for id in &site.root().unwrap().children {
//!     println!("{id}");
//! }
//! # Ok::<(), sitegraph::BuildError>(())
//! ```

pub mod config;
pub mod graph;
pub mod macros;
pub mod naming;
pub mod order;
pub mod output;
pub mod parse;
pub mod paths;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::path::Path;

use thiserror::Error;

use crate::config::SiteConfig;
use crate::graph::GraphError;
use crate::scan::ScanError;
use crate::types::Page;

pub use crate::types::Site;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Build the finished site graph for the source tree at `root`.
pub fn build_site(root: &Path, config: &SiteConfig) -> Result<Site, BuildError> {
    let output_root_name = scan::output_root_name(root)?;
    tracing::info!(root = %root.display(), output_root_name = %output_root_name, "Building site");

    let pages = scan::scan_pages(root, config)?;
    let mut site = link_site(output_root_name, pages.into_pages())?;
    site.append_html = config.append_html;

    tracing::info!(
        name = %site.name,
        pages = site.len(),
        tags = site.tags.len(),
        "Site graph complete"
    );
    Ok(site)
}

/// Link and order an already-parsed page set.
pub fn link_site(output_root_name: String, pages: Vec<Page>) -> Result<Site, GraphError> {
    let mut graph = graph::assemble(pages)?;
    order::order_pages(&mut graph.pages);
    Ok(Site::new(
        output_root_name,
        graph.pages,
        graph.tags,
        graph.date_hierarchy,
    ))
}
