//! CLI entry point for blogkit

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogkit::{Catalog, DocumentSet, Post, SiteConfig};

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version)]
#[command(about = "Inspect a directory of markdown blog documents", long_about = None)]
struct Cli {
    /// Directory containing the markdown documents
    #[arg(short, long, global = true, default_value = "content")]
    source: PathBuf,

    /// Site configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every post, newest first
    List,

    /// Show a single post
    Show {
        /// Slug of the post
        slug: String,

        /// Print the full post as JSON instead of rendered HTML
        #[arg(long)]
        json: bool,
    },

    /// Print the table of contents of a post
    Toc {
        /// Slug of the post
        slug: String,
    },

    /// List posts related to the given one by shared tags
    Related {
        /// Slug of the post
        slug: String,

        /// Maximum number of related posts
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// List every tag in the catalog
    Tags,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogkit=debug,info"
    } else {
        "blogkit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };

    let documents = DocumentSet::from_dir(&cli.source)?;
    tracing::debug!("Loaded {} documents from {:?}", documents.len(), cli.source);
    let catalog = Catalog::new(documents, config);

    match cli.command {
        Commands::List => {
            for post in catalog.list_all() {
                print_summary(&post);
            }
        }

        Commands::Show { slug, json } => {
            let Some(post) = catalog.get_by_slug(&slug) else {
                bail!("no post with slug '{}'", slug);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&post)?);
            } else {
                println!("{} by {} ({} min read)", post.title, post.author, post.reading_time);
                if !post.description.is_empty() {
                    println!("{}", post.description);
                }
                println!();
                println!("{}", post.html);
            }
        }

        Commands::Toc { slug } => {
            let Some(post) = catalog.get_by_slug(&slug) else {
                bail!("no post with slug '{}'", slug);
            };
            for entry in &post.toc {
                println!(
                    "{}{} (#{})",
                    "  ".repeat(entry.level.saturating_sub(1) as usize),
                    entry.text,
                    entry.id
                );
            }
        }

        Commands::Related { slug, limit } => {
            if catalog.get_by_slug(&slug).is_none() {
                bail!("no post with slug '{}'", slug);
            }
            for post in catalog.get_related(&slug, limit) {
                print_summary(&post);
            }
        }

        Commands::Tags => {
            for tag in catalog.tags() {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

fn print_summary(post: &Post) {
    println!(
        "{}  {:<24} {} min  [{}]",
        post.date.format("%Y-%m-%d"),
        post.slug,
        post.reading_time,
        post.tags.join(", ")
    );
}
