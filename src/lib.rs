//! blogkit: a markdown blog content pipeline
//!
//! This crate derives render-ready blog posts from raw markdown documents
//! with optional frontmatter: rendered HTML, a table of contents, a
//! reading-time estimate, and tag-based related-post queries. The whole
//! pipeline is a pure, synchronous derivation over a fixed document set.

pub mod catalog;
pub mod config;
pub mod content;

pub use catalog::{Catalog, DocumentSet};
pub use config::SiteConfig;
pub use content::{FrontMatter, Post, TocEntry};

use thiserror::Error;

/// Errors produced while turning a raw document into a post.
///
/// These surface per document: the catalog logs and drops the offending
/// document instead of failing the whole listing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed YAML front-matter: {0}")]
    YamlFrontmatter(#[from] serde_yaml::Error),

    #[error("malformed JSON front-matter: {0}")]
    JsonFrontmatter(#[from] serde_json::Error),

    #[error("unterminated front-matter header")]
    UnterminatedHeader,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
