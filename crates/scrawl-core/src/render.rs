//! Block-aware HTML rendering
//!
//! Turns parsed content into an HTML fragment: structured posts render
//! block by block, legacy posts go through the markdown fallback. All
//! author text passes through escaping before markup is wrapped around
//! it.

use crate::blocks::{parse_content, Block, BlockKind, CalloutVariant, Content};
use crate::highlight::escape_html;
use crate::markdown::render_markdown;

const P_CLASS: &str = "font-serif leading-relaxed mb-4";
const H1_CLASS: &str = "text-3xl font-bold mt-8 mb-4";
const H2_CLASS: &str = "text-2xl font-bold mt-8 mb-4";
const H3_CLASS: &str = "text-xl font-bold mt-6 mb-3";
const PRE_CLASS: &str = "bg-muted p-4 rounded-sm overflow-x-auto border-2 border-foreground my-4";
const QUOTE_CLASS: &str = "border-l-4 border-primary pl-4 italic my-4 text-muted-foreground";
const CITE_CLASS: &str = "block font-mono text-sm mt-2 not-italic";
const CALLOUT_CLASS: &str = "my-8 p-4 bg-accent border-2 border-foreground rotate-1 shadow-sm";
const CALLOUT_TEXT_CLASS: &str = "font-mono text-sm text-accent-foreground";
const UL_CLASS: &str = "list-disc ml-6 my-4";
const OL_CLASS: &str = "list-decimal ml-6 my-4";
const IMG_CLASS: &str = "rounded-sm border-2 border-foreground";
const CAPTION_CLASS: &str = "font-mono text-xs text-muted-foreground mt-2 text-center";
const HR_CLASS: &str = "border-t-2 border-foreground my-8";

/// Render a stored content string, whichever form it takes.
pub fn render_post_body(raw: &str) -> String {
    render_content(&parse_content(raw))
}

/// Render parsed content to an HTML fragment.
pub fn render_content(content: &Content) -> String {
    match content {
        Content::Structured(blocks) => render_blocks(blocks),
        Content::Legacy(raw) => render_markdown(raw),
    }
}

/// Render a block sequence in order.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        render_block(&mut html, block);
    }
    html
}

fn render_block(html: &mut String, block: &Block) {
    match &block.kind {
        BlockKind::Paragraph { text } => {
            html.push_str(&format!(
                "<p class=\"{}\">{}</p>",
                P_CLASS,
                escape_html(text)
            ));
        }
        BlockKind::Heading { level, text } => {
            // Levels outside 1-3 are clamped rather than rejected
            let (tag, class) = match level {
                0 | 1 => ("h1", H1_CLASS),
                2 => ("h2", H2_CLASS),
                _ => ("h3", H3_CLASS),
            };
            html.push_str(&format!(
                "<{tag} class=\"{}\">{}</{tag}>",
                class,
                escape_html(text)
            ));
        }
        BlockKind::Code {
            language,
            code,
            caption,
        } => {
            html.push_str("<figure class=\"my-4\">");
            html.push_str(&format!(
                "<pre class=\"{}\"><code class=\"text-sm language-{}\">{}</code></pre>",
                PRE_CLASS,
                escape_html(language),
                escape_html(code)
            ));
            if let Some(caption) = caption {
                html.push_str(&format!(
                    "<figcaption class=\"{}\">{}</figcaption>",
                    CAPTION_CLASS,
                    escape_html(caption)
                ));
            }
            html.push_str("</figure>");
        }
        BlockKind::Quote { text, attribution } => {
            html.push_str(&format!(
                "<blockquote class=\"{}\">{}",
                QUOTE_CLASS,
                escape_html(text)
            ));
            if let Some(attribution) = attribution {
                html.push_str(&format!(
                    "<cite class=\"{}\">— {}</cite>",
                    CITE_CLASS,
                    escape_html(attribution)
                ));
            }
            html.push_str("</blockquote>");
        }
        BlockKind::Callout {
            variant,
            title,
            text,
        } => {
            let heading = title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| variant.label());
            html.push_str(&format!(
                "<div class=\"{}\"><p class=\"{}\"><strong>{} {}:</strong> {}</p></div>",
                CALLOUT_CLASS,
                CALLOUT_TEXT_CLASS,
                variant_emoji(*variant),
                escape_html(heading),
                escape_html(text)
            ));
        }
        BlockKind::List { ordered, items } => {
            let (tag, class) = if *ordered {
                ("ol", OL_CLASS)
            } else {
                ("ul", UL_CLASS)
            };
            html.push_str(&format!("<{tag} class=\"{}\">", class));
            for item in items {
                html.push_str(&format!("<li class=\"mb-1\">{}</li>", escape_html(item)));
            }
            html.push_str(&format!("</{tag}>"));
        }
        BlockKind::Image { url, alt, caption } => {
            html.push_str("<figure class=\"my-8\">");
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" class=\"{}\" />",
                escape_html(url),
                escape_html(alt.as_deref().unwrap_or("")),
                IMG_CLASS
            ));
            if let Some(caption) = caption {
                html.push_str(&format!(
                    "<figcaption class=\"{}\">{}</figcaption>",
                    CAPTION_CLASS,
                    escape_html(caption)
                ));
            }
            html.push_str("</figure>");
        }
        BlockKind::Divider => {
            html.push_str(&format!("<hr class=\"{}\" />", HR_CLASS));
        }
    }
}

fn variant_emoji(variant: CalloutVariant) -> &'static str {
    match variant {
        CalloutVariant::Idea => "💡",
        CalloutVariant::Fun => "🎉",
        CalloutVariant::Note => "📝",
        CalloutVariant::Warn => "⚠️",
    }
}
