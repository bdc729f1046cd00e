//! Command handlers
//!
//! Each handler takes the opened store plus the parsed arguments and is
//! responsible for its own output. Rendering commands print raw HTML
//! fragments regardless of the output format so they can be piped into
//! templates.

use anyhow::{bail, Result};
use scrawl_core::{blocks, render_post_body, Block, Content, Post, PostStore};

use crate::output::Output;

pub fn list(store: &PostStore, output: &Output, all: bool, category: Option<&str>) -> Result<()> {
    let posts: Vec<&Post> = match (all, category) {
        (_, Some(category)) => store.by_category(category),
        (true, None) => store.all().iter().collect(),
        (false, None) => store.published(),
    };
    output.print_post_list(&posts);
    Ok(())
}

pub fn show(store: &PostStore, output: &Output, slug: &str) -> Result<()> {
    match store.get_by_slug(slug) {
        Some(post) => {
            output.print_post(post);
            Ok(())
        }
        None => bail!("no post with slug '{}'", slug),
    }
}

pub fn search(store: &PostStore, output: &Output, query: &str, limit: usize) -> Result<()> {
    let mut results = store.search(query);
    results.truncate(limit);
    output.print_search_results(query, &results);
    Ok(())
}

pub fn render(store: &PostStore, slug: &str) -> Result<()> {
    match store.get_by_slug(slug) {
        Some(post) => {
            println!("{}", render_post_body(&post.content));
            Ok(())
        }
        None => bail!("no post with slug '{}'", slug),
    }
}

pub fn stats(store: &PostStore, output: &Output, slug: &str) -> Result<()> {
    let Some(post) = store.get_by_slug(slug) else {
        bail!("no post with slug '{}'", slug);
    };

    let plain = post.plain_text();
    let words = blocks::word_count(&plain);
    let minutes = blocks::estimate_reading_minutes(&plain);

    match post.parsed_content() {
        Content::Structured(content_blocks) => {
            output.print_message(&format!("Content:  structured ({} blocks)", content_blocks.len()));
        }
        Content::Legacy(_) => {
            output.print_message("Content:  legacy markdown");
        }
    }
    output.print_message(&format!("Words:    {}", words));
    output.print_message(&format!("Reading:  {} min", minutes));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn new(
    store: &mut PostStore,
    output: &Output,
    title: &str,
    excerpt: Option<&str>,
    category: Option<&str>,
    tags: &[String],
    content_file: Option<&str>,
    publish: bool,
) -> Result<()> {
    let mut post = Post::new(title);

    if let Some(excerpt) = excerpt {
        post.set_excerpt(excerpt);
    }
    if let Some(category) = category {
        post.set_category(category);
    }
    post.set_tags(tags.to_vec());
    post.set_published(publish);

    match content_file {
        // Stored verbatim: a block envelope parses as structured,
        // anything else renders through the markdown fallback
        Some(path) => post.set_content(std::fs::read_to_string(path)?),
        None => post.set_blocks(&[Block::paragraph("")]),
    }

    if store.get_by_slug(&post.slug).is_some() {
        bail!("a post with slug '{}' already exists", post.slug);
    }

    store.save_post(&post)?;
    output.print_message(&format!("Created post '{}'", post.slug));
    if output.is_quiet() {
        println!("{}", post.slug);
    }
    Ok(())
}

pub fn publish(store: &mut PostStore, output: &Output, slug: &str, unpublish: bool) -> Result<()> {
    let Some(post) = store.get_by_slug(slug) else {
        bail!("no post with slug '{}'", slug);
    };

    let mut post = post.clone();
    post.set_published(!unpublish);
    store.save_post(&post)?;

    output.print_message(&format!(
        "{} '{}'",
        if unpublish { "Unpublished" } else { "Published" },
        slug
    ));
    Ok(())
}

pub fn delete(store: &mut PostStore, output: &Output, slug: &str) -> Result<()> {
    store.delete_post(slug)?;
    output.print_message(&format!("Deleted post '{}'", slug));
    Ok(())
}
