//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata header of a blog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(rename = "coverImage", alias = "cover_image")]
    pub cover_image: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from a raw document.
    /// Returns (front_matter, body).
    ///
    /// A malformed header is an error; the catalog decides what to do with
    /// the document. A document without a header parses to defaults with the
    /// whole text as body.
    pub fn parse(raw: &str) -> Result<(Self, &str)> {
        let raw = raw.trim_start();

        // YAML front-matter (---)
        if raw.starts_with("---") {
            return Self::parse_yaml(raw);
        }

        // JSON front-matter (;;; or a leading object)
        if raw.starts_with(";;;") || raw.starts_with('{') {
            return Self::parse_json(raw);
        }

        Ok((FrontMatter::default(), raw))
    }

    fn parse_yaml(raw: &str) -> Result<(Self, &str)> {
        let rest = &raw[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), raw));
        };

        let header = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        if header.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        if !looks_like_yaml(header) {
            // A thematic break at the top of the document, not a header
            return Ok((FrontMatter::default(), raw));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(header)?;
        Ok((fm, body))
    }

    fn parse_json(raw: &str) -> Result<(Self, &str)> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = raw.strip_prefix(";;;") {
            let Some(end) = rest.find(";;;") else {
                return Err(Error::UnterminatedHeader);
            };
            let fm: FrontMatter = serde_json::from_str(&rest[..end])?;
            let body = rest[end + 3..].trim_start_matches(['\n', '\r']);
            return Ok((fm, body));
        }

        // A bare JSON object at the start of the document
        let mut depth = 0;
        let mut end = 0;
        for (i, c) in raw.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if end == 0 {
            return Err(Error::UnterminatedHeader);
        }

        let fm: FrontMatter = serde_json::from_str(&raw[..end])?;
        let body = raw[end..].trim_start_matches(['\n', '\r']);
        Ok((fm, body))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// A header only counts as YAML when some line carries a `key: value` pair;
/// a bare `---` at the top of a document is a thematic break, not metadata.
fn looks_like_yaml(header: &str) -> bool {
    header.lines().any(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return false;
        }
        let Some(colon) = line.find(':') else {
            return false;
        };
        let key = &line[..colon];
        let value = &line[colon + 1..];
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp")
            && (value.is_empty() || value.starts_with(' '))
    })
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
        // Try parsing date only
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}
