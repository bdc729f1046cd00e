//! Scrawl Core Library
//!
//! This crate provides the core functionality for scrawl, a personal
//! publishing site: structured post content, client-side fuzzy search,
//! match highlighting, and rendering.
//!
//! # Architecture
//!
//! A post's body is an ordered sequence of typed blocks serialized to a
//! versioned JSON envelope; rows written before the block editor hold
//! raw markdown and keep rendering through a fallback path forever.
//! Search runs in-memory over a snapshot of the posts, per keystroke,
//! with no server-side index.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let store = PostStore::open(&config)?;
//!
//! for result in store.search("css").iter().take(6) {
//!     println!("{:.2}  {}", result.score, result.item.title);
//! }
//! ```
//!
//! # Modules
//!
//! - `models`: Post and Category data structures
//! - `blocks`: structured content, parsing, plain-text projection
//! - `search`: similarity scoring and fuzzy ranking
//! - `highlight`: match highlighting for search results
//! - `markdown`: legacy markdown fallback renderer
//! - `render`: block-aware HTML rendering
//! - `store`: file-backed post collection
//! - `config`: application configuration

pub mod blocks;
pub mod config;
pub mod highlight;
pub mod markdown;
pub mod models;
pub mod render;
pub mod search;
pub mod store;

pub use blocks::{
    blocks_to_plain_text, estimate_reading_minutes, parse_content, reading_time_label,
    serialize_blocks, word_count, Block, BlockKind, CalloutVariant, Content, ContentError,
};
pub use config::Config;
pub use highlight::{escape_html, highlight_matches};
pub use markdown::render_markdown;
pub use models::{slugify, Category, Post};
pub use render::{render_content, render_post_body};
pub use search::{fuzzy_search, similarity, FuzzyResult};
pub use store::{PostStore, StoreError};
