//! Table-of-contents extraction and heading-id normalization

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref HEADING_LINE: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// One heading in a document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading depth, 1..=6
    pub level: u8,
    /// Visible heading text with markup stripped
    pub text: String,
    /// Anchor id, identical to the id the renderer puts on the heading tag
    pub id: String,
}

/// Build an ordered outline by scanning the raw markdown line by line.
///
/// The scan is deliberately naive (no fence tracking): it mirrors what the
/// renderer sees for ordinary documents, and the ids come from the same
/// [`heading_id`] rule so TOC anchors always resolve to rendered headings.
pub fn build_toc(markdown: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();

    for line in markdown.lines() {
        if let Some(caps) = HEADING_LINE.captures(line) {
            let level = caps[1].len() as u8;
            let text = strip_markup(caps[2].trim());
            let id = heading_id(&text);
            entries.push(TocEntry { level, text, id });
        }
    }

    entries
}

/// Remove HTML tags and emphasis markers from heading text
pub(crate) fn strip_markup(text: &str) -> String {
    HTML_TAG.replace_all(text, "").replace(['*', '_', '`'], "")
}

/// Normalize heading text into an anchor id.
///
/// Lowercase, drop non-word characters, collapse whitespace runs to single
/// hyphens, trim leading and trailing hyphens. Deterministic and pure; two
/// headings that normalize to the same slug keep the same id (no suffixing).
pub fn heading_id(text: &str) -> String {
    let lowered = strip_markup(text).to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(cleaned.trim(), "-");
    hyphenated.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_id_normalization() {
        assert_eq!(heading_id("My Test Heading!"), "my-test-heading");
        assert_eq!(heading_id("Section 1"), "section-1");
        assert_eq!(heading_id("  What's   new?  "), "whats-new");
        assert_eq!(heading_id("---Edge--- Case---"), "edge-case");
        assert_eq!(heading_id("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_heading_id_strips_markup() {
        assert_eq!(heading_id("Using `Vec<T>` in *Rust*"), "using-vect-in-rust");
        assert_eq!(heading_id("<em>Emphasis</em> kept out"), "emphasis-kept-out");
    }

    #[test]
    fn test_build_toc_levels_and_ids() {
        let markdown = "# Test Blog\n\nIntro.\n\n## Section 1\n\nText.\n\n### Sub *section*\n";
        let toc = build_toc(markdown);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[0].text, "Test Blog");
        assert_eq!(toc[0].id, "test-blog");
        assert_eq!(toc[1].level, 2);
        assert_eq!(toc[1].id, "section-1");
        assert_eq!(toc[2].level, 3);
        assert_eq!(toc[2].text, "Sub section");
        assert_eq!(toc[2].id, "sub-section");
    }

    #[test]
    fn test_build_toc_ignores_non_headings() {
        let markdown = "#not-a-heading\n####### seven\nplain line\n#\n";
        assert!(build_toc(markdown).is_empty());
    }

    #[test]
    fn test_build_toc_keeps_document_order() {
        let markdown = "## Second-level first\n\n# Top later\n";
        let toc = build_toc(markdown);
        assert_eq!(toc[0].level, 2);
        assert_eq!(toc[1].level, 1);
    }
}
