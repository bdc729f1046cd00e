//! Data models for scrawl
//!
//! Defines the core data structures: Post and Category. A post's
//! `content` column holds either a structured block envelope or legacy
//! markdown; which one is decided at read time by `blocks::parse_content`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blocks::{self, Block, Content};

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Unique identifier
    pub id: Uuid,
    /// URL slug, derived from the title
    pub slug: String,
    /// Display title
    pub title: String,
    /// Stored content: block envelope or legacy markdown
    pub content: String,
    /// Short summary shown on cards and in search results
    pub excerpt: String,
    /// Category name
    pub category: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Optional header image URL
    pub image: Option<String>,
    /// Reading-time label, e.g. "5 min"; computed when content is set
    pub reading_time: String,
    /// Whether the post is publicly visible
    pub published: bool,
    /// When this post was created
    pub created_at: DateTime<Utc>,
    /// When this post was last updated
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new unpublished post with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            content: String::new(),
            excerpt: String::new(),
            category: String::new(),
            tags: Vec::new(),
            image: None,
            reading_time: blocks::reading_time_label(""),
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a post with a specific ID (for loading from storage)
    pub fn with_id(id: Uuid, title: impl Into<String>) -> Self {
        let mut post = Self::new(title);
        post.id = id;
        post
    }

    /// Update the title and regenerate the slug
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.slug = slugify(&self.title);
        self.updated_at = Utc::now();
    }

    /// Replace the stored content and recompute the reading time
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.reading_time = blocks::reading_time_label(&self.content);
        self.updated_at = Utc::now();
    }

    /// Replace the content with a serialized block sequence
    pub fn set_blocks(&mut self, content_blocks: &[Block]) {
        self.set_content(blocks::serialize_blocks(content_blocks));
    }

    /// Update the excerpt
    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.excerpt = excerpt.into();
        self.updated_at = Utc::now();
    }

    /// Update the category
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.updated_at = Utc::now();
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.updated_at = Utc::now();
        }
    }

    /// Remove a tag
    pub fn remove_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            self.updated_at = Utc::now();
        }
    }

    /// Set all tags (replacing existing)
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.updated_at = Utc::now();
    }

    /// Publish or unpublish
    pub fn set_published(&mut self, published: bool) {
        self.published = published;
        self.updated_at = Utc::now();
    }

    /// Interpret the stored content (structured vs legacy)
    pub fn parsed_content(&self) -> Content {
        blocks::parse_content(&self.content)
    }

    /// Plain text of the post body, for word counts and indexing
    pub fn plain_text(&self) -> String {
        self.parsed_content().plain_text()
    }

    /// Fields the search engine matches against: title, excerpt,
    /// category, then each tag.
    ///
    /// The full body text is deliberately left out: each field
    /// comparison can cost O(n·m) in the edit-distance fallback, so
    /// matching stays on the short metadata fields.
    pub fn searchable_fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.title.clone(),
            self.excerpt.clone(),
            self.category.clone(),
        ];
        fields.extend(self.tags.iter().cloned());
        fields
    }
}

/// A post category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category name
    pub name: String,
    /// Emoji shown next to the name
    pub emoji: String,
}

impl Category {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji, self.name)
    }
}

/// Derive a URL slug from a title: lowercase, alphanumeric runs joined
/// by single dashes, no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;

    #[test]
    fn test_post_new() {
        let post = Post::new("Why I Hate CSS (A Love Letter)");
        assert_eq!(post.title, "Why I Hate CSS (A Love Letter)");
        assert_eq!(post.slug, "why-i-hate-css-a-love-letter");
        assert!(!post.published);
        assert!(post.tags.is_empty());
        assert_eq!(post.reading_time, "1 min");
    }

    #[test]
    fn test_post_with_id() {
        let id = Uuid::new_v4();
        let post = Post::with_id(id, "Test Post");
        assert_eq!(post.id, id);
        assert_eq!(post.slug, "test-post");
    }

    #[test]
    fn test_set_title_regenerates_slug() {
        let mut post = Post::new("Old Title");
        post.set_title("Brand New Title!");
        assert_eq!(post.slug, "brand-new-title");
    }

    #[test]
    fn test_set_content_updates_reading_time() {
        let mut post = Post::new("Long Read");
        let body = vec!["word"; 450].join(" ");
        post.set_blocks(&[Block::paragraph(body)]);
        assert_eq!(post.reading_time, "3 min");
    }

    #[test]
    fn test_post_tags() {
        let mut post = Post::new("Tagged");
        post.add_tag("rust");
        post.add_tag("debugging");
        assert_eq!(post.tags, vec!["rust", "debugging"]);

        // Adding duplicate should not add again
        post.add_tag("rust");
        assert_eq!(post.tags.len(), 2);

        post.remove_tag("rust");
        assert_eq!(post.tags, vec!["debugging"]);
    }

    #[test]
    fn test_searchable_fields() {
        let mut post = Post::new("The Bug That Haunts Me");
        post.set_excerpt("Three weeks of my life.");
        post.set_category("debugging logs");
        post.set_tags(vec!["bugs".to_string(), "race-condition".to_string()]);

        assert_eq!(
            post.searchable_fields(),
            vec![
                "The Bug That Haunts Me",
                "Three weeks of my life.",
                "debugging logs",
                "bugs",
                "race-condition",
            ]
        );
    }

    #[test]
    fn test_plain_text_structured_and_legacy() {
        let mut post = Post::new("Structured");
        post.set_blocks(&[Block::paragraph("hello"), Block::paragraph("world")]);
        assert_eq!(post.plain_text(), "hello world");

        let mut legacy = Post::new("Legacy");
        legacy.set_content("not json at all");
        assert_eq!(legacy.plain_text(), "not json at all");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaces  everywhere  "), "spaces-everywhere");
        assert_eq!(slugify("Déjà vu"), "d-j-vu");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_post_serialization() {
        let mut post = Post::new("Round Trip");
        post.set_content("body text");
        post.add_tag("test");
        let json = serde_json::to_string(&post).unwrap();
        let deserialized: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post, deserialized);
    }

    #[test]
    fn test_category_display() {
        let cat = Category::new("terminal therapy", "🧠");
        assert_eq!(format!("{}", cat), "🧠 terminal therapy");
    }
}
