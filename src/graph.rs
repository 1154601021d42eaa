//! Site graph assembly.
//!
//! Links the raw page set into a tree and builds the secondary indices:
//!
//! - `children`: every non-root page is appended to its parent's list
//! - `siblings`: the other pages sharing the same parent
//! - `ancestors`: root-first chain from `index` to the direct parent
//! - tag buckets and the year → month date hierarchy
//!
//! Pages are visited in discovery order, so every list here starts out in
//! discovery order; [`crate::order`] sorts the navigation lists afterwards.
//! The root page gets no siblings, tag or date entries.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::naming::ROOT_ID;
use crate::types::{DateHierarchy, Page};

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Page {id} refers to missing parent {parent}")]
    DanglingParentReference { id: String, parent: String },
    #[error("Ancestry of page {id} does not lead back to index")]
    BrokenAncestryChain { id: String },
}

/// Linked pages plus the tag and date indices, ready for ordering.
#[derive(Debug)]
pub struct SiteGraph {
    pub pages: Vec<Page>,
    pub tags: BTreeMap<String, Vec<String>>,
    pub date_hierarchy: DateHierarchy,
}

/// Link `pages` (discovery order) into a site graph.
pub fn assemble(mut pages: Vec<Page>) -> Result<SiteGraph, GraphError> {
    let index: HashMap<String, usize> = pages
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    // Sibling groups keyed by parent id, in discovery order.
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, page) in pages.iter().enumerate() {
        if let Some(parent) = page.parent.as_deref() {
            groups.entry(parent).or_default().push(i);
        }
    }

    let mut children: Vec<Vec<String>> = vec![Vec::new(); pages.len()];
    let mut siblings: Vec<Vec<String>> = vec![Vec::new(); pages.len()];
    let mut ancestors: Vec<Vec<String>> = vec![Vec::new(); pages.len()];
    let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut date_hierarchy = DateHierarchy::new();

    for (i, page) in pages.iter().enumerate() {
        let Some(parent) = page.parent.as_deref() else {
            continue;
        };
        let &parent_idx = index
            .get(parent)
            .ok_or_else(|| GraphError::DanglingParentReference {
                id: page.id.clone(),
                parent: parent.to_string(),
            })?;
        children[parent_idx].push(page.id.clone());

        siblings[i] = groups[parent]
            .iter()
            .filter(|&&j| j != i)
            .map(|&j| pages[j].id.clone())
            .collect();

        for tag in &page.tags {
            tags.entry(tag.clone()).or_default().push(page.id.clone());
        }

        if let Some(date) = &page.date {
            date_hierarchy
                .entry(date.year.clone())
                .or_default()
                .entry(date.month.clone())
                .or_default()
                .push(page.id.clone());
        }

        ancestors[i] = ancestor_chain(&pages, &index, i)?;
    }

    for (i, page) in pages.iter_mut().enumerate() {
        page.children = std::mem::take(&mut children[i]);
        page.siblings = std::mem::take(&mut siblings[i]);
        page.ancestors = std::mem::take(&mut ancestors[i]);
        tracing::debug!(
            id = %page.id,
            ancestors = ?page.ancestors,
            children = ?page.children,
            siblings = ?page.siblings,
            "Interlinked page"
        );
    }

    Ok(SiteGraph {
        pages,
        tags,
        date_hierarchy,
    })
}

/// Walk `parent` links from `pages[start]` up to the root and return the
/// chain root-first.
///
/// A well-formed page of depth `d` reaches `index` in exactly `d + 1` steps,
/// so the walk stops there; a chain that has not reached `index` by then
/// (a cycle, or a parent that is not the root but has no parent itself) is
/// reported as broken.
fn ancestor_chain(
    pages: &[Page],
    index: &HashMap<String, usize>,
    start: usize,
) -> Result<Vec<String>, GraphError> {
    let limit = pages[start].depth + 1;
    let mut chain = Vec::with_capacity(limit);
    let mut current = &pages[start];

    while let Some(parent) = current.parent.as_deref() {
        if chain.len() == limit {
            break;
        }
        let &parent_idx = index
            .get(parent)
            .ok_or_else(|| GraphError::DanglingParentReference {
                id: current.id.clone(),
                parent: parent.to_string(),
            })?;
        chain.push(parent.to_string());
        if parent == ROOT_ID {
            break;
        }
        current = &pages[parent_idx];
    }

    chain.reverse();
    if chain.first().map(String::as_str) != Some(ROOT_ID) {
        tracing::error!(id = %pages[start].id, chain = ?chain, "Ultimate ancestor is not index");
        return Err(GraphError::BrokenAncestryChain {
            id: pages[start].id.clone(),
        });
    }
    Ok(chain)
}
