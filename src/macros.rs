//! Inline body macros.
//!
//! Page bodies may contain three directives wrapped in double braces. They
//! are rewritten into markup once, at parse time:
//!
//! ```text
//! {{link("/about","About us")}}               → <a href="/about">About us</a>
//! {{image("cat.png","A cat")}}                → <img src="cat.png" alt="A cat"/>
//! {{imagehw("cat.png","A cat","120","200")}}  → <img src="cat.png" alt="A cat" height="120" width="200"/>
//! ```
//!
//! Directive names are case-sensitive. Whitespace is allowed inside the
//! braces, around the name and around commas. Anything that does not match
//! these shapes exactly is left in the body untouched; there is no error for
//! a malformed directive and no escaping mechanism.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*link\s*\(\s*"(.*?)"\s*,\s*"(.*?)"\s*\)\s*\}\}"#).unwrap()
});

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*image\s*\(\s*"(.*?)"\s*,\s*"(.*?)"\s*\)\s*\}\}"#).unwrap()
});

static IMAGE_HW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\{\{\s*imagehw\s*\(\s*"(.*?)"\s*,\s*"(.*?)"\s*,\s*"(.*?)"\s*,\s*"(.*?)"\s*\)\s*\}\}"#,
    )
    .unwrap()
});

/// Expand every `link`, `image` and `imagehw` directive in `body`.
///
/// Passes run in that order over the whole text. Output of one pass is never
/// re-scanned by the same pass, so expansion is not recursive.
pub fn expand(body: &str) -> String {
    let body = LINK_RE.replace_all(body, |c: &Captures| {
        format!(r#"<a href="{}">{}</a>"#, &c[1], &c[2])
    });
    let body = IMAGE_RE.replace_all(&body, |c: &Captures| {
        format!(r#"<img src="{}" alt="{}"/>"#, &c[1], &c[2])
    });
    let body = IMAGE_HW_RE.replace_all(&body, |c: &Captures| {
        format!(
            r#"<img src="{}" alt="{}" height="{}" width="{}"/>"#,
            &c[1], &c[2], &c[3], &c[4]
        )
    });
    body.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_becomes_anchor() {
        assert_eq!(expand(r#"{{link("/a","A")}}"#), r#"<a href="/a">A</a>"#);
    }

    #[test]
    fn image_becomes_img() {
        assert_eq!(
            expand(r#"{{image("x.png","alt")}}"#),
            r#"<img src="x.png" alt="alt"/>"#
        );
    }

    #[test]
    fn imagehw_carries_dimensions() {
        assert_eq!(
            expand(r#"{{imagehw("x.png","alt","10","20")}}"#),
            r#"<img src="x.png" alt="alt" height="10" width="20"/>"#
        );
    }

    #[test]
    fn text_without_directives_is_unchanged() {
        let body = "<p>Plain {text} with {{braces}} and link(\"x\",\"y\")</p>";
        assert_eq!(expand(body), body);
    }

    #[test]
    fn whitespace_inside_braces_is_tolerated() {
        assert_eq!(
            expand(r#"{{ link ( "/a" ,  "A" ) }}"#),
            r#"<a href="/a">A</a>"#
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let body = r#"{{Link("/a","A")}}"#;
        assert_eq!(expand(body), body);
    }

    #[test]
    fn wrong_arity_is_left_alone() {
        let body = r#"{{image("x.png")}} {{imagehw("x.png","alt","10")}}"#;
        assert_eq!(expand(body), body);
    }

    #[test]
    fn several_directives_in_one_body() {
        let body = r#"<p>See {{link("/a","A")}} and {{link("/b","B")}}.</p>{{image("c.png","C")}}"#;
        assert_eq!(
            expand(body),
            r#"<p>See <a href="/a">A</a> and <a href="/b">B</a>.</p><img src="c.png" alt="C"/>"#
        );
    }

    #[test]
    fn image_pass_does_not_match_imagehw() {
        let out = expand(r#"{{imagehw("a.png","b","1","2")}}"#);
        assert!(out.starts_with("<img"));
        assert!(out.contains(r#"height="1""#));
    }
}
