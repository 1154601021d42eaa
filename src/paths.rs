//! Output paths for the finished site.
//!
//! The mapping from page id to output file is fixed and must stay bit-exact:
//! a page with id `a/b/c` is written to `a/b/c.html`, with a printable
//! variant at `a/b/c_print.html`. The root page `index` lands at
//! `index.html`.
//!
//! Besides pages, a renderer writes:
//!
//! ```text
//! error.html                 # generic error page
//! tags.html                  # list of all tags
//! tags/{tag}.html            # one page per tag
//! dates.html                 # month list (only if any page is dated)
//! {year}/{month}.html        # one page per year/month bucket
//! ```
//!
//! All paths are relative to `<output>/<output_root_name>`.

use serde::Serialize;

use crate::types::Site;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Output path of a page: `news/item` → `news/item.html`.
pub fn page_path(id: &str) -> String {
    format!("{id}.html")
}

/// Output path of a page's print variant: `news/item` → `news/item_print.html`.
pub fn print_path(id: &str) -> String {
    format!("{id}_print.html")
}

/// Output path of a tag page: `local_events` → `tags/local_events.html`.
pub fn tag_path(tag: &str) -> String {
    format!("tags/{tag}.html")
}

/// Output path of a month page: `("2024", "03")` → `2024/03.html`.
pub fn month_path(year: &str, month: &str) -> String {
    format!("{year}/{month}.html")
}

/// English month name for a two-digit month token (`"03"` → `"March"`).
pub fn month_name(month: &str) -> Option<&'static str> {
    let n: usize = month.parse().ok()?;
    MONTHS.get(n.checked_sub(1)?).copied()
}

/// What a planned output file is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputKind {
    Error,
    Page { id: String },
    PrintPage { id: String },
    TagList,
    Tag { tag: String },
    DateIndex,
    Month { year: String, month: String },
}

/// One output file, relative to the site output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOutput {
    pub path: String,
    #[serde(flatten)]
    pub kind: OutputKind,
}

/// Every file a renderer writes for a site, in write order.
#[derive(Debug, Clone, Serialize)]
pub struct OutputPlan {
    /// Directory name under the output directory (the source root's name).
    pub root_name: String,
    pub outputs: Vec<PlannedOutput>,
}

impl OutputPlan {
    pub fn for_site(site: &Site) -> Self {
        let mut outputs = vec![PlannedOutput {
            path: "error.html".to_string(),
            kind: OutputKind::Error,
        }];

        for page in site.pages() {
            outputs.push(PlannedOutput {
                path: page_path(&page.id),
                kind: OutputKind::Page {
                    id: page.id.clone(),
                },
            });
            outputs.push(PlannedOutput {
                path: print_path(&page.id),
                kind: OutputKind::PrintPage {
                    id: page.id.clone(),
                },
            });
        }

        outputs.push(PlannedOutput {
            path: "tags.html".to_string(),
            kind: OutputKind::TagList,
        });
        for tag in site.tags.keys() {
            outputs.push(PlannedOutput {
                path: tag_path(tag),
                kind: OutputKind::Tag { tag: tag.clone() },
            });
        }

        if !site.date_hierarchy.is_empty() {
            outputs.push(PlannedOutput {
                path: "dates.html".to_string(),
                kind: OutputKind::DateIndex,
            });
            for (year, months) in &site.date_hierarchy {
                for month in months.keys() {
                    outputs.push(PlannedOutput {
                        path: month_path(year, month),
                        kind: OutputKind::Month {
                            year: year.clone(),
                            month: month.clone(),
                        },
                    });
                }
            }
        }

        Self {
            root_name: site.output_root_name.clone(),
            outputs,
        }
    }

    /// Paths only, in plan order.
    pub fn paths(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.path.as_str()).collect()
    }
}
