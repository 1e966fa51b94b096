//! Post catalog - derives and queries blog posts from a document registry

mod documents;

pub use documents::DocumentSet;

use chrono::Local;

use crate::config::SiteConfig;
use crate::content::{build_toc, reading_time, FrontMatter, MarkdownRenderer, Post};
use crate::Result;

/// Stateless catalog over a fixed document set.
///
/// Every query recomputes the full derivation; at a handful of documents the
/// cost is negligible and caching would only add invalidation surface.
pub struct Catalog {
    documents: DocumentSet,
    config: SiteConfig,
    renderer: MarkdownRenderer,
}

impl Catalog {
    pub fn new(documents: DocumentSet, config: SiteConfig) -> Self {
        Self {
            documents,
            config,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// All posts, newest first.
    ///
    /// A document whose frontmatter fails to parse is logged and skipped;
    /// one malformed document never hides the rest of the catalog.
    pub fn list_all(&self) -> Vec<Post> {
        let mut posts = Vec::new();

        for (slug, raw) in self.documents.iter() {
            match self.build_post(slug, raw) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping document {}: {}", slug, e);
                }
            }
        }

        // Stable sort: equal dates keep registry order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Look up a single post. Unknown slugs are not an error.
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.list_all().into_iter().find(|p| p.slug == slug)
    }

    /// Posts related to `slug` by shared tags.
    ///
    /// Scores every other post by the count of tags it shares with the
    /// target, keeps score > 0 only, orders by score then date descending
    /// and truncates to `limit`. The result may be shorter than `limit`,
    /// and is empty when `slug` is unknown.
    pub fn get_related(&self, slug: &str, limit: usize) -> Vec<Post> {
        let posts = self.list_all();
        let Some(current) = posts.iter().find(|p| p.slug == slug) else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, &Post)> = posts
            .iter()
            .filter(|p| p.slug != slug)
            .map(|p| (shared_tag_count(p, current), p))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.date.cmp(&a.1.date)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, p)| p.clone()).collect()
    }

    /// Every distinct tag across the catalog, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .list_all()
            .into_iter()
            .flat_map(|p| p.tags)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Posts carrying `tag`, in `list_all()` order.
    pub fn posts_with_tag(&self, tag: &str) -> Vec<Post> {
        self.list_all()
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    fn build_post(&self, slug: &str, raw: &str) -> Result<Post> {
        let (fm, body) = FrontMatter::parse(raw)?;

        let html = self.renderer.render(body);
        let toc = build_toc(body);
        let minutes = reading_time(body);

        // Missing or unparseable dates default to load time; ordering of
        // such posts is not stable between runs.
        let date = fm.parse_date().unwrap_or_else(Local::now);

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_else(|| "Untitled".to_string()),
            description: fm.description.unwrap_or_default(),
            author: fm.author.unwrap_or_else(|| self.config.author.clone()),
            tags: fm.tags,
            cover_image: fm.cover_image.unwrap_or_default(),
            date,
            html,
            toc,
            reading_time: minutes,
        })
    }
}

/// Relatedness score: how many of `post`'s tags the target also carries
fn shared_tag_count(post: &Post, target: &Post) -> usize {
    post.tags
        .iter()
        .filter(|tag| target.tags.contains(tag))
        .count()
}
