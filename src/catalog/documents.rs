//! Read-only document registry: slug -> raw markdown text

use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::Result;

/// The fixed set of documents a catalog derives posts from.
///
/// Passed explicitly into [`crate::Catalog::new`] rather than living in a
/// module-level singleton, so tests can fabricate arbitrary sets. Insertion
/// order is preserved and doubles as the tie-break for equal dates.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    documents: IndexMap<String, String>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a slug. Re-inserting a slug replaces the
    /// earlier text, so slugs stay unique by construction.
    pub fn insert(&mut self, slug: impl Into<String>, raw: impl Into<String>) {
        self.documents.insert(slug.into(), raw.into());
    }

    /// Load every markdown file under `dir`; the file stem becomes the slug.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut set = Self::new();

        for entry in WalkDir::new(dir.as_ref())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let slug = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("untitled")
                    .to_string();
                set.insert(slug, fs::read_to_string(path)?);
            }
        }

        Ok(set)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.documents.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (slug, raw) in iter {
            set.insert(slug, raw);
        }
        set
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_insert_replaces_same_slug() {
        let mut set = DocumentSet::new();
        set.insert("a", "first");
        set.insert("a", "second");
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(("a", "second")));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let set = DocumentSet::from_iter([("z", "1"), ("a", "2"), ("m", "3")]);
        let slugs: Vec<&str> = set.iter().map(|(s, _)| s).collect();
        assert_eq!(slugs, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_dir_uses_file_stem_as_slug() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = std::fs::File::create(dir.path().join("hello-world.md")).unwrap();
        writeln!(f, "# Hello").unwrap();
        let mut g = std::fs::File::create(dir.path().join("notes.markdown")).unwrap();
        writeln!(g, "# Notes").unwrap();
        std::fs::File::create(dir.path().join("ignored.txt")).unwrap();

        let set = DocumentSet::from_dir(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("hello-world"));
        assert!(set.contains("notes"));
        assert!(!set.contains("ignored"));
    }
}
