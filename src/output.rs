//! CLI output formatting for the finished site graph.
//!
//! # Output Format
//!
//! ## Scan / Check
//!
//! ```text
//! Pages
//! Example Site → index.html
//!     001 About → about.html
//!         Source: about.html
//!         Tags: meta
//!         001 Contact → about/contact.html
//!             Source: about/contact.html
//!     002 News → news.html
//!
//! Tags
//!     meta (1 page)
//!     untagged (3 pages)
//!
//! Dates
//!     2024
//!         03 March (1 page)
//! ```
//!
//! Pages are shown in navigation order (resolved order, then title), with
//! positional indices per sibling level.
//!
//! ## Plan
//!
//! ```text
//! Output → dist/example.com
//!     error.html
//!     index.html
//!     index_print.html
//!     about.html
//!     about_print.html
//!     tags.html
//!     tags/meta.html
//!
//! Planned 7 files: 2 pages, 1 tags, 0 months
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; the `print_*`
//! wrappers write them to stdout.

use std::path::Path;

use crate::paths::{self, OutputKind, OutputPlan};
use crate::types::{Page, Site};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// One page header line: index, title and output path.
fn page_line(position: Option<usize>, page: &Page) -> String {
    match position {
        Some(pos) => format!(
            "{} {} → {}",
            format_index(pos),
            page.title,
            paths::page_path(&page.id)
        ),
        None => format!("{} → {}", page.title, paths::page_path(&page.id)),
    }
}

fn push_page(lines: &mut Vec<String>, site: &Site, page: &Page, position: usize, depth: usize) {
    let base = indent(depth);
    lines.push(format!("{}{}", base, page_line(Some(position), page)));
    lines.push(format!("{}    Source: {}", base, page.source_path));
    if page.tags.iter().any(|t| t != crate::parse::UNTAGGED) {
        lines.push(format!("{}    Tags: {}", base, page.tags.join(", ")));
    }
    if let Some(date) = &page.date {
        lines.push(format!("{}    Date: {}", base, date.date));
    }
    for (i, child) in site.resolve(&page.children).enumerate() {
        push_page(lines, site, child, i + 1, depth + 1);
    }
}

/// Format the page tree, tag buckets and date hierarchy of a site.
pub fn format_site_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    if let Some(root) = site.root() {
        lines.push(page_line(None, root));
        for (i, child) in site.resolve(&root.children).enumerate() {
            push_page(&mut lines, site, child, i + 1, 1);
        }
    }

    lines.push(String::new());
    lines.push("Tags".to_string());
    for (tag, ids) in &site.tags {
        lines.push(format!("    {} ({})", tag, plural(ids.len(), "page")));
    }

    if !site.date_hierarchy.is_empty() {
        lines.push(String::new());
        lines.push("Dates".to_string());
        for (year, months) in &site.date_hierarchy {
            lines.push(format!("    {year}"));
            for (month, ids) in months {
                lines.push(format!(
                    "        {} {} ({})",
                    month,
                    paths::month_name(month).unwrap_or("?"),
                    plural(ids.len(), "page")
                ));
            }
        }
    }

    lines
}

/// Print the site tree to stdout.
pub fn print_site_output(site: &Site) {
    for line in format_site_output(site) {
        println!("{}", line);
    }
}

/// Format the output plan: every path a renderer would write.
pub fn format_plan_output(plan: &OutputPlan, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Output → {}",
        output_dir.join(&plan.root_name).display()
    )];
    let (mut pages, mut tags, mut months) = (0, 0, 0);
    for out in &plan.outputs {
        match out.kind {
            OutputKind::Page { .. } => pages += 1,
            OutputKind::Tag { .. } => tags += 1,
            OutputKind::Month { .. } => months += 1,
            _ => {}
        }
        lines.push(format!("    {}", out.path));
    }
    lines.push(String::new());
    lines.push(format!(
        "Planned {} files: {} pages, {} tags, {} months",
        plan.outputs.len(),
        pages,
        tags,
        months
    ));
    lines
}

/// Print the output plan to stdout.
pub fn print_plan_output(plan: &OutputPlan, output_dir: &Path) {
    for line in format_plan_output(plan, output_dir) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn format_index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn site_output_follows_navigation_order() {
        let site = site_from(&[
            ("index", "title: Home"),
            ("news", "title: News\norder: 0\ntags: A"),
            ("about", "title: About\norder: 1"),
            ("news/item", "title: Item\ndate: 2024-03-15"),
        ]);
        let lines = format_site_output(&site);
        assert_eq!(
            lines,
            vec![
                "Pages",
                "Home → index.html",
                "    001 About → about.html",
                "        Source: about.html",
                "    002 News → news.html",
                "        Source: news.html",
                "        Tags: a",
                "        001 Item → news/item.html",
                "            Source: news/item.html",
                "            Date: 2024-03-15",
                "",
                "Tags",
                "    a (1 page)",
                "    untagged (2 pages)",
                "",
                "Dates",
                "    2024",
                "        03 March (1 page)",
            ]
        );
    }

    #[test]
    fn site_output_omits_dates_when_undated() {
        let site = site_from(&[("index", "title: Home"), ("a", "title: A")]);
        let lines = format_site_output(&site);
        assert!(!lines.contains(&"Dates".to_string()));
    }

    #[test]
    fn plan_output_counts_kinds() {
        let site = site_from(&[
            ("index", "title: Home"),
            ("a", "title: A\ntags: x, y\ndate: 2024-01-02"),
        ]);
        let plan = OutputPlan::for_site(&site);
        let lines = format_plan_output(&plan, Path::new("dist"));
        assert_eq!(
            lines[0],
            format!("Output → {}", Path::new("dist").join("test.site").display())
        );
        assert_eq!(
            lines.last().unwrap(),
            "Planned 10 files: 2 pages, 2 tags, 1 months"
        );
    }
}
