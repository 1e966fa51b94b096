//! Derived blog post model and the reading-time estimate

use chrono::{DateTime, Local};
use serde::Serialize;

use super::toc::TocEntry;

/// Reading-speed divisor. The raw markdown is counted as-is, code blocks
/// included, so code-heavy posts skew high; displayed values depend on this
/// exact divisor and the round-up, so both are kept as-is.
const WORDS_PER_MINUTE: usize = 200;

/// A render-ready blog post derived from one raw document
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Stable identifier, the key of the source document
    pub slug: String,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Used for filtering and relatedness; may repeat across posts
    pub tags: Vec<String>,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
    /// Publication date. Falls back to load time when the frontmatter has no
    /// parseable date, so ordering of undated posts varies between runs.
    pub date: DateTime<Local>,
    /// Rendered markup, injected into the page as-is
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Whole minutes, rounded up, never zero
    #[serde(rename = "readingTime")]
    pub reading_time: u32,
}

/// Estimated reading time in minutes: `ceil(words / 200)` over the
/// whitespace-delimited tokens of the trimmed body.
pub fn reading_time(markdown: &str) -> u32 {
    let words = markdown.split_whitespace().count().max(1);
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_reading_time_exact_page() {
        assert_eq!(reading_time(&words(200)), 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(&words(201)), 2);
        assert_eq!(reading_time(&words(450)), 3);
    }

    #[test]
    fn test_reading_time_short_body() {
        assert_eq!(reading_time("just a few words"), 1);
    }

    #[test]
    fn test_reading_time_never_zero() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("   \n  "), 1);
    }

    #[test]
    fn test_reading_time_is_idempotent() {
        let body = words(777);
        assert_eq!(reading_time(&body), reading_time(&body));
    }
}
