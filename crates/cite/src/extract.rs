use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Citation, WEB_SOURCE};

/// Heading fragment that opens the references section (matched lowercased).
const REFERENCES_HEADING: &str = "references";

/// Fields every citation line must carry: title, author, date, url.
const REQUIRED_FIELDS: usize = 4;

static MARKER: OnceLock<Regex> = OnceLock::new();

fn marker() -> &'static Regex {
    MARKER.get_or_init(|| Regex::new(r"^\[\s*\d+\s*\]\s*(.*)$").expect("citation marker regex"))
}

/// Why a candidate line in the references section was not turned into a citation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("line does not start with a numbered [n] marker")]
    MissingMarker,
    #[error("expected 4 pipe-delimited fields, found {0}")]
    TooFewFields(usize),
}

/// A candidate citation line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input text.
    pub line_number: usize,
    pub line: String,
    pub reason: SkipReason,
}

/// Result of scanning an article for citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub citations: Vec<Citation>,
    pub skipped: Vec<SkippedLine>,
}

/// Scan `text` for a references section and parse its `[n] Title | Author | Date | URL`
/// lines.
///
/// The first line containing "references" (any case) opens the section and is
/// not itself parsed. Inside the section only lines starting with `[` are
/// considered. Citations are numbered by a local counter in order of
/// appearance; the numeral printed in the text is discarded. Malformed lines
/// are recorded in [`Extraction::skipped`] and never stop the scan.
pub fn extract(text: &str) -> Extraction {
    let mut extraction = Extraction::default();
    let mut in_references = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if !in_references {
            if line.to_lowercase().contains(REFERENCES_HEADING) {
                in_references = true;
            }
            continue;
        }

        if !line.starts_with('[') {
            continue;
        }

        let number = extraction.citations.len() as u32 + 1;
        match parse_line(line, number) {
            Ok(citation) => extraction.citations.push(citation),
            Err(reason) => {
                tracing::warn!(line_number = index + 1, %reason, "skipping citation line: {line}");
                extraction.skipped.push(SkippedLine {
                    line_number: index + 1,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    extraction
}

/// Best-effort variant of [`extract`] that drops the skip diagnostics.
pub fn extract_citations(text: &str) -> Vec<Citation> {
    extract(text).citations
}

fn parse_line(line: &str, number: u32) -> Result<Citation, SkipReason> {
    let rest = marker()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .ok_or(SkipReason::MissingMarker)?
        .as_str();

    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(SkipReason::TooFewFields(fields.len()));
    }

    Ok(Citation {
        number,
        title: fields[0].to_string(),
        author: fields[1].to_string(),
        date: fields[2].to_string(),
        url: fields[3].to_string(),
        kind: WEB_SOURCE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_references_heading_yields_nothing() {
        let text = "# Title\n[1] A | B | 2024-01-01 | http://x\nSome body text.";
        let extraction = extract(text);
        assert!(extraction.citations.is_empty());
        assert!(extraction.skipped.is_empty());
    }

    #[test]
    fn parses_two_well_formed_lines() {
        let text = "References\n[1] A | B | 2024-01-01 | http://x\n[2] C | D | 2024-02-02 | http://y";
        let citations = extract_citations(text);
        assert_eq!(
            citations,
            vec![
                Citation::web(1, "A", "B", "2024-01-01", "http://x"),
                Citation::web(2, "C", "D", "2024-02-02", "http://y"),
            ]
        );
        assert!(citations.iter().all(|c| c.kind == "Web"));
    }

    #[test]
    fn malformed_line_does_not_advance_counter() {
        let text = "## References\n[1] OnlyTitle\n[2] C | D | 2024-02-02 | http://y";
        let extraction = extract(text);

        assert_eq!(extraction.citations.len(), 1);
        assert_eq!(extraction.citations[0].number, 1);
        assert_eq!(extraction.citations[0].title, "C");

        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(extraction.skipped[0].line_number, 2);
        assert_eq!(extraction.skipped[0].line, "[1] OnlyTitle");
        assert_eq!(extraction.skipped[0].reason, SkipReason::TooFewFields(1));
    }

    #[test]
    fn bracket_lines_before_heading_are_ignored() {
        let text = "[9] Early | Nobody | 2020 | http://early\n\n**References**\n[7] Late | Someone | 2021 | http://late";
        let citations = extract_citations(text);
        assert_eq!(citations, vec![Citation::web(1, "Late", "Someone", "2021", "http://late")]);
    }

    #[test]
    fn printed_numbers_are_discarded() {
        let text = "# REFERENCES\n[12] A | B | C | D\n[3] E | F | G | H";
        let numbers: Vec<u32> = extract_citations(text).iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn extra_fields_are_ignored_and_values_trimmed() {
        let text = "References\n   [1]   Title  |  Author |2024|  https://example.com/a  | Web | extra  ";
        let citations = extract_citations(text);
        assert_eq!(
            citations,
            vec![Citation::web(1, "Title", "Author", "2024", "https://example.com/a")]
        );
    }

    #[test]
    fn empty_fields_are_kept() {
        let text = "References\n[1] Title |  |  | ";
        let citations = extract_citations(text);
        assert_eq!(citations, vec![Citation::web(1, "Title", "", "", "")]);
    }

    #[test]
    fn bracket_without_number_is_skipped() {
        let text = "References\n[Insert citation here] | a | b | c\n[1] T | A | D | U";
        let extraction = extract(text);
        assert_eq!(extraction.skipped[0].reason, SkipReason::MissingMarker);
        assert_eq!(extraction.citations.len(), 1);
        assert_eq!(extraction.citations[0].number, 1);
    }

    #[test]
    fn non_bracket_lines_in_section_are_silently_ignored() {
        let text = "References:\n\nThe sources below were consulted.\n- not a citation\n[1] T | A | D | U";
        let extraction = extract(text);
        assert!(extraction.skipped.is_empty());
        assert_eq!(extraction.citations.len(), 1);
    }

    #[test]
    fn heading_without_citations_is_empty() {
        let extraction = extract("Body\n\n## References\n\nNone available.");
        assert_eq!(extraction, Extraction::default());
    }

    #[test]
    fn heading_line_is_not_parsed_even_if_bracketed() {
        let text = "[1] References | a | b | c\n[2] T | A | D | U";
        let citations = extract_citations(text);
        assert_eq!(citations, vec![Citation::web(1, "T", "A", "D", "U")]);
    }
}
