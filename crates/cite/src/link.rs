use std::sync::OnceLock;

use regex::{Captures, Regex};
use url::Url;

use crate::model::Citation;

static IN_TEXT_MARKER: OnceLock<Regex> = OnceLock::new();

fn in_text_marker() -> &'static Regex {
    IN_TEXT_MARKER.get_or_init(|| Regex::new(r"\[(\d{1,3})\]").expect("in-text marker regex"))
}

/// Replace in-text `[n]` markers with anchors pointing at citation `n`'s URL.
///
/// Only `http`/`https` URLs are linked, HTML-escaped into the `href`.
/// Markers without a matching citation, or whose citation has no usable URL,
/// are left as they are.
pub fn link_citations(content: &str, citations: &[Citation]) -> String {
    in_text_marker()
        .replace_all(content, |caps: &Captures| {
            let marker = &caps[0];
            let Ok(number) = caps[1].parse::<u32>() else {
                return marker.to_string();
            };
            match citations
                .iter()
                .find(|c| c.number == number)
                .and_then(|c| link_target(&c.url))
            {
                Some(href) => format!(r#"<a href="{href}" target="_blank">[{number}]</a>"#),
                None => marker.to_string(),
            }
        })
        .into_owned()
}

/// Escaped `href` value for a web URL, or `None` for anything else.
fn link_target(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| escape_attr(raw))
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_known_markers() {
        let citations = vec![Citation::web(1, "A", "B", "2024", "http://x")];
        let linked = link_citations("Growth doubled [1].", &citations);
        assert_eq!(linked, r#"Growth doubled <a href="http://x" target="_blank">[1]</a>."#);
    }

    #[test]
    fn leaves_unknown_and_urlless_markers() {
        let citations = vec![
            Citation::web(1, "A", "B", "2024", ""),
            Citation::web(2, "C", "D", "2024", "http://y"),
        ];
        let linked = link_citations("See [1], [2] and [3].", &citations);
        assert_eq!(
            linked,
            r#"See [1], <a href="http://y" target="_blank">[2]</a> and [3]."#
        );
    }

    #[test]
    fn ignores_markers_longer_than_three_digits() {
        let citations = vec![Citation::web(1, "A", "B", "2024", "http://x")];
        assert_eq!(link_citations("[1000]", &citations), "[1000]");
    }

    #[test]
    fn quotes_in_url_cannot_break_out_of_href() {
        let citations = vec![Citation::web(1, "A", "B", "2024", "https://example.com/a\"b?x=1&y=<2>")];
        let linked = link_citations("See [1].", &citations);
        assert_eq!(
            linked,
            r#"See <a href="https://example.com/a&quot;b?x=1&amp;y=&lt;2&gt;" target="_blank">[1]</a>."#
        );

        let hostile = vec![Citation::web(1, "A", "B", "2024", r#"http://x" onmouseover="alert(1)"#)];
        let linked = link_citations("See [1].", &hostile);
        assert!(!linked.contains(r#"" onmouseover=""#));
    }

    #[test]
    fn non_web_schemes_stay_plain() {
        let citations = vec![
            Citation::web(1, "A", "B", "2024", "javascript:alert(1)"),
            Citation::web(2, "C", "D", "2024", "not a url"),
            Citation::web(3, "E", "F", "2024", "ftp://files.example.com/r.pdf"),
        ];
        assert_eq!(link_citations("[1] [2] [3]", &citations), "[1] [2] [3]");
    }
}
