//! Navigation ordering.
//!
//! Navigation lists default to alphabetical order on title. Authors can add
//! an `order` integer to a page header:
//!
//! - positive values are used as-is, so low values go to the top
//!   (`order: 4` is the 4th listing)
//! - zero and negative values count from the end of the page's sibling group
//!   (`order: 0` is last, `order: -1` second to last); offsets reaching past
//!   the front of the group pin the page to rank 1
//!
//! Duplicate order values are fine; title breaks the tie, then discovery
//! order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::Page;

/// Resolve a declared order into a navigation rank.
///
/// `group_size` is the number of pages sharing the page's parent, the page
/// itself included. The result is always at least 1.
///
/// ```
/// use sitegraph::order::resolve_order;
///
/// assert_eq!(resolve_order(2, 4), 2);
/// assert_eq!(resolve_order(0, 4), 4);
/// assert_eq!(resolve_order(-1, 4), 3);
/// assert_eq!(resolve_order(-9, 4), 1);
/// ```
pub fn resolve_order(declared: i64, group_size: usize) -> i64 {
    if declared > 0 {
        declared
    } else {
        (group_size as i64 + declared).max(1)
    }
}

/// Resolve every page's order, then sort `children` and `siblings` of every
/// page by `(order, title)`.
///
/// Must run exactly once, after [`crate::graph::assemble`].
pub fn order_pages(pages: &mut [Page]) {
    for page in pages.iter_mut() {
        page.order = resolve_order(page.declared_order, page.siblings.len() + 1);
    }

    let keys: HashMap<String, (i64, String)> = pages
        .iter()
        .map(|p| (p.id.clone(), (p.order, p.title.clone())))
        .collect();

    for page in pages.iter_mut() {
        sort_by_rank(&mut page.children, &keys);
        sort_by_rank(&mut page.siblings, &keys);
    }
}

/// Stable sort of page ids by `(order, title)`. Unknown ids sort last.
fn sort_by_rank(ids: &mut [String], keys: &HashMap<String, (i64, String)>) {
    ids.sort_by(|a, b| match (keys.get(a), keys.get(b)) {
        (Some(ka), Some(kb)) => ka.cmp(kb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
