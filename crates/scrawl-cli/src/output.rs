//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use scrawl_core::{highlight_matches, FuzzyResult, Post};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// One search hit as emitted by `scrawl search --json`
#[derive(Serialize)]
struct SearchHit<'a> {
    slug: &'a str,
    title: &'a str,
    excerpt: &'a str,
    category: &'a str,
    tags: &'a [String],
    score: f64,
    /// Title with match ranges wrapped in <mark> tags
    highlighted_title: String,
    /// Excerpt with match ranges wrapped in <mark> tags
    highlighted_excerpt: String,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single post with its metadata
    pub fn print_post(&self, post: &Post) {
        match self.format {
            OutputFormat::Human => {
                println!("Slug:      {}", post.slug);
                println!("Title:     {}", post.title);
                if !post.excerpt.is_empty() {
                    println!("Excerpt:   {}", post.excerpt);
                }
                if !post.category.is_empty() {
                    println!("Category:  {}", post.category);
                }
                if !post.tags.is_empty() {
                    println!("Tags:      {}", post.tags.join(", "));
                }
                println!("Reading:   {}", post.reading_time);
                println!("Published: {}", if post.published { "yes" } else { "no" });
                println!("Created:   {}", post.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:   {}", post.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(post).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", post.slug);
            }
        }
    }

    /// Print a list of posts
    pub fn print_post_list(&self, posts: &[&Post]) {
        match self.format {
            OutputFormat::Human => {
                if posts.is_empty() {
                    println!("No posts found.");
                    return;
                }
                for post in posts {
                    let marker = if post.published { " " } else { "*" };
                    println!(
                        "{}{:<40} {:<20} {}",
                        marker,
                        truncate_line(&post.title, 38),
                        truncate_line(&post.category, 18),
                        post.reading_time
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(posts).unwrap());
            }
            OutputFormat::Quiet => {
                for post in posts {
                    println!("{}", post.slug);
                }
            }
        }
    }

    /// Print ranked search results
    pub fn print_search_results(&self, query: &str, results: &[FuzzyResult<&Post>]) {
        match self.format {
            OutputFormat::Human => {
                if results.is_empty() {
                    println!("No results for \"{}\".", query);
                    return;
                }
                println!("Found {} result(s) for \"{}\":", results.len(), query);
                for result in results {
                    println!(
                        "  {:.2}  {:<40} {}",
                        result.score,
                        truncate_line(&result.item.title, 38),
                        result.item.category
                    );
                }
            }
            OutputFormat::Json => {
                let hits: Vec<SearchHit<'_>> = results
                    .iter()
                    .map(|result| SearchHit {
                        slug: &result.item.slug,
                        title: &result.item.title,
                        excerpt: &result.item.excerpt,
                        category: &result.item.category,
                        tags: &result.item.tags,
                        score: result.score,
                        highlighted_title: highlight_matches(&result.item.title, query),
                        highlighted_excerpt: highlight_matches(&result.item.excerpt, query),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&hits).unwrap());
            }
            OutputFormat::Quiet => {
                for result in results {
                    println!("{}", result.item.slug);
                }
            }
        }
    }

    /// Print a status message (suppressed in quiet mode)
    pub fn print_message(&self, message: &str) {
        if !self.is_quiet() {
            println!("{}", message);
        }
    }
}

/// Truncate a line to a maximum width, appending an ellipsis
fn truncate_line(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", truncated)
}
