//! Scrawl CLI
//!
//! Command-line interface for scrawl - a personal publishing site with
//! structured posts and fuzzy search.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scrawl_core::{Config, PostStore};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "scrawl")]
#[command(about = "scrawl - personal blog posts with fuzzy search")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts (published by default)
    List {
        /// Include unpublished posts
        #[arg(long)]
        all: bool,
        /// Only posts in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a post's metadata
    Show {
        /// Post slug
        slug: String,
    },
    /// Fuzzy-search published posts
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render a post body to an HTML fragment
    Render {
        /// Post slug
        slug: String,
    },
    /// Word count and reading time for a post
    Stats {
        /// Post slug
        slug: String,
    },
    /// Create a new post
    New {
        /// Post title (the slug is derived from it)
        title: String,
        /// Short summary for cards and search results
        #[arg(long)]
        excerpt: Option<String>,
        /// Category name
        #[arg(long)]
        category: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Read the content from a file instead of starting empty
        #[arg(long)]
        file: Option<String>,
        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },
    /// Publish a post
    Publish {
        /// Post slug
        slug: String,
        /// Unpublish instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete a post
    Delete {
        /// Post slug
        slug: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load()?;
    let mut store = PostStore::open(&config)?;

    match cli.command {
        Commands::List { all, category } => {
            commands::list(&store, &output, all, category.as_deref())
        }
        Commands::Show { slug } => commands::show(&store, &output, &slug),
        Commands::Search { query, limit } => commands::search(
            &store,
            &output,
            &query,
            limit.unwrap_or(config.search_limit),
        ),
        Commands::Render { slug } => commands::render(&store, &slug),
        Commands::Stats { slug } => commands::stats(&store, &output, &slug),
        Commands::New {
            title,
            excerpt,
            category,
            tags,
            file,
            publish,
        } => commands::new(
            &mut store,
            &output,
            &title,
            excerpt.as_deref(),
            category.as_deref(),
            &tags,
            file.as_deref(),
            publish,
        ),
        Commands::Publish { slug, undo } => commands::publish(&mut store, &output, &slug, undo),
        Commands::Delete { slug } => commands::delete(&mut store, &output, &slug),
    }
}
