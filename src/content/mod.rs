//! Content module - frontmatter, markdown rendering, TOC and the post model

mod frontmatter;
mod markdown;
mod post;
mod toc;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{reading_time, Post};
pub use toc::{build_toc, heading_id, TocEntry};
