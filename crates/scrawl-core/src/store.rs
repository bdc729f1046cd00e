//! Post storage
//!
//! Posts live as individual JSON files in the configured posts
//! directory, one file per post named after its slug. The store loads
//! everything into memory on open; queries and search run over that
//! snapshot. This is the local stand-in for whatever list-fetch
//! endpoint a deployment would use — the search and rendering layers
//! only ever see a `Vec<Post>`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::models::Post;
use crate::search::{fuzzy_search, FuzzyResult};

/// Errors that can occur during post storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid post file '{path}': {source}")]
    InvalidPost {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No post with slug '{0}'")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed post collection
pub struct PostStore {
    posts_dir: PathBuf,
    posts: Vec<Post>,
}

impl PostStore {
    /// Open the store using the given configuration
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        Self::open_dir(&config.posts_dir)
    }

    /// Open the store over a specific directory
    pub fn open_dir(posts_dir: &Path) -> Result<Self, StoreError> {
        let mut store = Self {
            posts_dir: posts_dir.to_path_buf(),
            posts: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Reload all posts from disk
    ///
    /// Unreadable or malformed files are skipped with a warning so one
    /// bad row never takes down the whole site.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.posts.clear();

        if !self.posts_dir.exists() {
            return Ok(());
        }

        let mut entries: Vec<PathBuf> = std::fs::read_dir(&self.posts_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        for path in entries {
            match Self::load_post(&path) {
                Ok(post) => self.posts.push(post),
                Err(err) => {
                    tracing::warn!("skipping post file {:?}: {err}", path);
                }
            }
        }

        // Newest first, matching the public listing order
        self.posts
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(())
    }

    fn load_post(path: &Path) -> Result<Post, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::InvalidPost {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a post to disk (create or overwrite), then refresh the
    /// in-memory snapshot
    pub fn save_post(&mut self, post: &Post) -> Result<(), StoreError> {
        let path = self.post_path(&post.slug);
        let json = serde_json::to_string_pretty(post).map_err(|source| StoreError::InvalidPost {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("saved post {:?}", path);
        self.reload()
    }

    /// Delete a post by slug
    pub fn delete_post(&mut self, slug: &str) -> Result<(), StoreError> {
        let path = self.post_path(slug);
        if !path.exists() {
            return Err(StoreError::NotFound(slug.to_string()));
        }
        std::fs::remove_file(&path)?;
        self.reload()
    }

    /// All posts, newest first
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Published posts only, newest first
    pub fn published(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.published).collect()
    }

    /// Look up a post by slug
    pub fn get_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Published posts in a category
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.published && p.category == category)
            .collect()
    }

    /// All distinct tags across posts, sorted
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags = std::collections::HashSet::new();
        for post in &self.posts {
            for tag in &post.tags {
                tags.insert(tag.clone());
            }
        }
        let mut tags: Vec<_> = tags.into_iter().collect();
        tags.sort();
        tags
    }

    /// Fuzzy-search published posts
    ///
    /// Returns the full ranked set; callers truncate to their display
    /// limit.
    pub fn search(&self, query: &str) -> Vec<FuzzyResult<&Post>> {
        fuzzy_search(self.published(), query, |post| post.searchable_fields())
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.posts_dir.join(format!("{}.json", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use tempfile::tempdir;

    fn post(title: &str, excerpt: &str, tags: &[&str], published: bool) -> Post {
        let mut post = Post::new(title);
        post.set_excerpt(excerpt);
        post.set_tags(tags.iter().map(|t| t.to_string()).collect());
        post.set_published(published);
        post
    }

    #[test]
    fn test_open_empty_directory() {
        let dir = tempdir().unwrap();
        let store = PostStore::open_dir(dir.path()).unwrap();
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_save_and_get_post() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        let mut post = post("Why I Hate CSS", "A love letter.", &["css"], true);
        post.set_blocks(&[Block::paragraph("gaslit by a stylesheet")]);
        store.save_post(&post).unwrap();

        let loaded = store.get_by_slug("why-i-hate-css").unwrap();
        assert_eq!(loaded.title, "Why I Hate CSS");
        assert_eq!(loaded.tags, vec!["css"]);
        assert!(loaded.parsed_content().is_structured());
    }

    #[test]
    fn test_delete_post() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        store.save_post(&post("Gone Soon", "", &[], true)).unwrap();
        assert!(store.get_by_slug("gone-soon").is_some());

        store.delete_post("gone-soon").unwrap();
        assert!(store.get_by_slug("gone-soon").is_none());

        assert!(matches!(
            store.delete_post("never-existed"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let mut store = PostStore::open_dir(dir.path()).unwrap();
        assert!(store.all().is_empty());

        store.save_post(&post("Fine Post", "", &[], true)).unwrap();
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_published_filter_and_category() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        let mut a = post("Public Rant", "", &[], true);
        a.set_category("random rants");
        let b = post("Secret Draft", "", &[], false);
        store.save_post(&a).unwrap();
        store.save_post(&b).unwrap();

        assert_eq!(store.all().len(), 2);
        assert_eq!(store.published().len(), 1);
        assert_eq!(store.by_category("random rants").len(), 1);
        assert!(store.by_category("tech philosophy").is_empty());
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        store
            .save_post(&post("One", "", &["rust", "css"], true))
            .unwrap();
        store
            .save_post(&post("Two", "", &["css", "bugs"], true))
            .unwrap();

        assert_eq!(store.all_tags(), vec!["bugs", "css", "rust"]);
    }

    #[test]
    fn test_search_only_covers_published_posts() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        store
            .save_post(&post("CSS Chaos", "about css", &["css"], true))
            .unwrap();
        store
            .save_post(&post("CSS Drafts", "more css", &["css"], false))
            .unwrap();

        let results = store.search("css");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item.title, "CSS Chaos");
    }

    #[test]
    fn test_search_ranks_by_score() {
        let dir = tempdir().unwrap();
        let mut store = PostStore::open_dir(dir.path()).unwrap();

        store
            .save_post(&post("css", "", &[], true))
            .unwrap();
        store
            .save_post(&post("Why I Hate CSS And Everything Else", "", &[], true))
            .unwrap();

        let results = store.search("css");
        assert_eq!(results.len(), 2);
        // Exact title match outranks the longer containment match
        assert_eq!(results[0].item.title, "css");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
