//! Structured post content
//!
//! A post body is an ordered sequence of typed blocks (paragraphs,
//! headings, code, quotes, callouts, lists, images, dividers) serialized
//! to a versioned JSON envelope. Posts written before the block editor
//! existed store raw markdown instead; parsing falls back to a legacy
//! representation for those rather than ever failing.
//!
//! The plain-text projection of a block sequence is the single source of
//! truth for word counts, reading-time estimates, and search indexing.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Version tag written into the content envelope. Readers accept any
/// version (or none) so the schema can evolve without breaking old rows.
pub const CONTENT_FORMAT_VERSION: &str = "2025-12";

/// Reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Errors from the strict structured-content decode.
///
/// These never escape the crate's public parsing API: any error here
/// means the content is treated as legacy text instead. Authors typed
/// those old rows by hand, so rendering must never hard-fail on them.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON content is not a block document")]
    UnexpectedShape,

    #[error("block document contains no blocks")]
    Empty,
}

/// One unit of post content.
///
/// The `id` is an opaque stable identifier used as a rendering key and
/// for reordering in the editor. It is generated at creation time and
/// regenerated on parse only when the stored block lacks one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// The typed payload of a block, discriminated by `type` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph {
        text: String,
    },
    Heading {
        level: u8,
        text: String,
    },
    Code {
        language: String,
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
    Callout {
        variant: CalloutVariant,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Divider,
}

/// Flavor of a callout block
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    Idea,
    Fun,
    Note,
    Warn,
}

impl CalloutVariant {
    /// Display label, used as the callout title when none is set
    pub fn label(&self) -> &'static str {
        match self {
            CalloutVariant::Idea => "idea",
            CalloutVariant::Fun => "fun",
            CalloutVariant::Note => "note",
            CalloutVariant::Warn => "warn",
        }
    }
}

fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

impl Block {
    /// Create a block with a freshly generated id
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: new_block_id(),
            kind,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph { text: text.into() })
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading {
            level,
            text: text.into(),
        })
    }

    pub fn code(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(BlockKind::Code {
            language: language.into(),
            code: code.into(),
            caption: None,
        })
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Quote {
            text: text.into(),
            attribution: None,
        })
    }

    pub fn callout(variant: CalloutVariant, text: impl Into<String>) -> Self {
        Self::new(BlockKind::Callout {
            variant,
            title: None,
            text: text.into(),
        })
    }

    pub fn list(ordered: bool, items: Vec<String>) -> Self {
        Self::new(BlockKind::List { ordered, items })
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::new(BlockKind::Image {
            url: url.into(),
            alt: None,
            caption: None,
        })
    }

    pub fn divider() -> Self {
        Self::new(BlockKind::Divider)
    }
}

/// The interpretation of a stored content string.
///
/// Recomputed from the raw string on every read; never persisted as a
/// flag. A string either parses into blocks or it is legacy text —
/// there is no third state.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Parsed block sequence, rendered by the block renderer
    Structured(Vec<Block>),
    /// Pre-block-editor content, rendered by the markdown fallback
    Legacy(String),
}

impl Content {
    /// Plain-text projection used for word counts and search indexing.
    pub fn plain_text(&self) -> String {
        match self {
            Content::Structured(blocks) => blocks_to_plain_text(blocks),
            Content::Legacy(raw) => raw.clone(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Content::Structured(_))
    }
}

/// Strict decode of a stored content string into blocks.
///
/// Accepts either the `{version, blocks: [...]}` envelope (any version)
/// or a bare block array. Everything else is an error, which callers
/// translate into the legacy fallback.
fn try_parse_blocks(raw: &str) -> Result<Vec<Block>, ContentError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("blocks") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(ContentError::UnexpectedShape),
        },
        _ => return Err(ContentError::UnexpectedShape),
    };

    if items.is_empty() {
        return Err(ContentError::Empty);
    }

    let mut blocks = Vec::with_capacity(items.len());
    for item in items {
        blocks.push(serde_json::from_value::<Block>(item)?);
    }
    Ok(blocks)
}

/// Parse a stored content string.
///
/// Never fails: content that is not a valid block document becomes
/// `Content::Legacy` wrapping the exact input string. Blocks that were
/// stored without ids get fresh ones.
pub fn parse_content(raw: &str) -> Content {
    match try_parse_blocks(raw) {
        Ok(mut blocks) => {
            for block in &mut blocks {
                if block.id.is_empty() {
                    block.id = new_block_id();
                }
            }
            Content::Structured(blocks)
        }
        Err(err) => {
            tracing::trace!("treating content as legacy text: {err}");
            Content::Legacy(raw.to_string())
        }
    }
}

/// Serialize blocks into the versioned storage envelope.
pub fn serialize_blocks(blocks: &[Block]) -> String {
    #[derive(Serialize)]
    struct Envelope<'a> {
        version: &'a str,
        blocks: &'a [Block],
    }

    serde_json::to_string(&Envelope {
        version: CONTENT_FORMAT_VERSION,
        blocks,
    })
    .expect("block serialization cannot fail")
}

/// Space-joined plain text of a block sequence.
///
/// Headings, paragraphs and quotes contribute their text, callouts
/// their `title (or variant): text`, lists their joined items, code its
/// raw source. Images and dividers contribute nothing.
pub fn blocks_to_plain_text(blocks: &[Block]) -> String {
    let mut pieces: Vec<String> = Vec::new();

    for block in blocks {
        match &block.kind {
            BlockKind::Paragraph { text }
            | BlockKind::Heading { text, .. }
            | BlockKind::Quote { text, .. } => pieces.push(text.clone()),
            BlockKind::Callout {
                variant,
                title,
                text,
            } => {
                let heading = title
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| variant.label());
                pieces.push(format!("{}: {}", heading, text));
            }
            BlockKind::List { items, .. } => pieces.push(items.join(" ")),
            BlockKind::Code { code, .. } => pieces.push(code.clone()),
            BlockKind::Image { .. } | BlockKind::Divider => {}
        }
    }

    pieces.join(" ").trim().to_string()
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reading time in whole minutes, never less than one.
pub fn estimate_reading_minutes(text: &str) -> usize {
    let words = word_count(text);
    std::cmp::max(1, words.div_ceil(WORDS_PER_MINUTE))
}

/// Reading-time label for a stored content string, e.g. `"5 min"`.
///
/// Computed at write time by whoever persists the post; the projection
/// of the parsed content is what gets counted.
pub fn reading_time_label(raw_content: &str) -> String {
    let minutes = estimate_reading_minutes(&parse_content(raw_content).plain_text());
    format!("{} min", minutes)
}
