//! Legacy markdown rendering
//!
//! Posts written before the block editor store raw markdown in their
//! content column. Those rows are never migrated, so this constrained
//! renderer has to keep working indefinitely: headings, emphasis,
//! inline code, fenced code blocks, links, images, blockquotes,
//! horizontal rules, list items, and blank-line paragraph breaks.
//!
//! Output is an HTML fragment with fixed style classes. All author text
//! is escaped before any markup is wrapped around it, so the input can
//! never inject tags of its own.

use crate::highlight::escape_html;

const PRE_CLASS: &str = "bg-muted p-4 rounded-sm overflow-x-auto border-2 border-foreground my-4";
const INLINE_CODE_CLASS: &str = "bg-muted px-1.5 py-0.5 rounded text-sm font-mono";
const H1_CLASS: &str = "text-2xl font-bold mt-8 mb-4";
const H2_CLASS: &str = "text-xl font-bold mt-8 mb-3";
const H3_CLASS: &str = "text-lg font-bold mt-6 mb-2";
const LINK_CLASS: &str = "text-primary underline hover:no-underline";
const IMG_CLASS: &str = "rounded-sm border-2 border-foreground my-4";
const BLOCKQUOTE_CLASS: &str = "border-l-4 border-primary pl-4 italic my-4 text-muted-foreground";
const HR_CLASS: &str = "border-t-2 border-foreground my-8";
const LI_CLASS: &str = "ml-4";
const LI_ORDERED_CLASS: &str = "ml-4 list-decimal";
const P_CLASS: &str = "my-4";

/// Render legacy markdown to an HTML fragment.
pub fn render_markdown(markdown: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = markdown.lines().peekable();

    while let Some(line) = lines.next() {
        let trimmed = line.trim_end();

        // Fenced code block: consume until the closing fence
        if trimmed.starts_with("```") {
            flush_paragraph(&mut html, &mut paragraph);
            let mut code = String::new();
            for code_line in lines.by_ref() {
                if code_line.trim_end().starts_with("```") {
                    break;
                }
                code.push_str(code_line);
                code.push('\n');
            }
            html.push_str(&format!(
                "<pre class=\"{}\"><code class=\"text-sm\">{}</code></pre>",
                PRE_CLASS,
                escape_text(&code)
            ));
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<h3 class=\"{}\">{}</h3>",
                H3_CLASS,
                render_inline(text)
            ));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<h2 class=\"{}\">{}</h2>",
                H2_CLASS,
                render_inline(text)
            ));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<h1 class=\"{}\">{}</h1>",
                H1_CLASS,
                render_inline(text)
            ));
        } else if let Some(text) = trimmed.strip_prefix("> ") {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<blockquote class=\"{}\">{}</blockquote>",
                BLOCKQUOTE_CLASS,
                render_inline(text)
            ));
        } else if trimmed == "---" {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!("<hr class=\"{}\" />", HR_CLASS));
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<li class=\"{}\">{}</li>",
                LI_CLASS,
                render_inline(text)
            ));
        } else if let Some(text) = strip_ordered_marker(trimmed) {
            flush_paragraph(&mut html, &mut paragraph);
            html.push_str(&format!(
                "<li class=\"{}\">{}</li>",
                LI_ORDERED_CLASS,
                render_inline(text)
            ));
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut html, &mut paragraph);
    html
}

/// Escape text content (`&`, `<`, `>`) for HTML text nodes.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip an ordered-list marker like `1. ` or `42. `
fn strip_ordered_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

fn flush_paragraph(html: &mut String, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join("\n");
    paragraph.clear();
    if text.trim().is_empty() {
        return;
    }
    html.push_str(&format!(
        "<p class=\"{}\">{}</p>",
        P_CLASS,
        render_inline(&text)
    ));
}

/// Render inline markdown: emphasis, inline code, links, images.
/// Everything else is escaped verbatim.
fn render_inline(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '`' => {
                if let Some(close) = find_char(&chars, '`', i + 1) {
                    if close > i + 1 {
                        let inner: String = chars[i + 1..close].iter().collect();
                        out.push_str(&format!(
                            "<code class=\"{}\">{}</code>",
                            INLINE_CODE_CLASS,
                            escape_text(&inner)
                        ));
                        i = close + 1;
                        continue;
                    }
                }
                out.push('`');
                i += 1;
            }
            '*' => {
                let run = run_length(&chars, i, '*').min(3);
                if let Some(close) = find_run(&chars, '*', run, i + run) {
                    let inner: String = chars[i + run..close].iter().collect();
                    if !inner.is_empty() {
                        let rendered = render_inline(&inner);
                        match run {
                            3 => out.push_str(&format!("<strong><em>{}</em></strong>", rendered)),
                            2 => out.push_str(&format!("<strong>{}</strong>", rendered)),
                            _ => out.push_str(&format!("<em>{}</em>", rendered)),
                        }
                        i = close + run;
                        continue;
                    }
                }
                out.push('*');
                i += 1;
            }
            '!' if chars.get(i + 1) == Some(&'[') => {
                if let Some((alt, url, next)) = parse_bracket_pair(&chars, i + 1) {
                    out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\" class=\"{}\" />",
                        escape_html(&url),
                        escape_html(&alt),
                        IMG_CLASS
                    ));
                    i = next;
                    continue;
                }
                out.push('!');
                i += 1;
            }
            '[' => {
                if let Some((label, url, next)) = parse_bracket_pair(&chars, i) {
                    out.push_str(&format!(
                        "<a href=\"{}\" class=\"{}\">{}</a>",
                        escape_html(&url),
                        LINK_CLASS,
                        escape_text(&label)
                    ));
                    i = next;
                    continue;
                }
                out.push('[');
                i += 1;
            }
            c => {
                match c {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '>' => out.push_str("&gt;"),
                    _ => out.push(c),
                }
                i += 1;
            }
        }
    }

    out
}

/// Parse `[label](url)` starting at the `[`. Returns the label, the
/// url, and the index just past the closing parenthesis.
fn parse_bracket_pair(chars: &[char], open: usize) -> Option<(String, String, usize)> {
    if chars.get(open) != Some(&'[') {
        return None;
    }
    let close_bracket = find_char(chars, ']', open + 1)?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return None;
    }
    let close_paren = find_char(chars, ')', close_bracket + 2)?;

    let label: String = chars[open + 1..close_bracket].iter().collect();
    let url: String = chars[close_bracket + 2..close_paren].iter().collect();
    if url.is_empty() {
        return None;
    }
    Some((label, url, close_paren + 1))
}

fn find_char(chars: &[char], needle: char, from: usize) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == needle)
}

/// Length of the run of `c` starting at `i`
fn run_length(chars: &[char], i: usize, c: char) -> usize {
    chars[i..].iter().take_while(|&&x| x == c).count()
}

/// Find the next run of exactly-or-more `len` copies of `c` at or after
/// `from`, returning its start index.
fn find_run(chars: &[char], c: char, len: usize, from: usize) -> Option<usize> {
    let mut i = from;
    while i + len <= chars.len() {
        if chars[i..i + len].iter().all(|&x| x == c) {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(
            render_markdown("# Title"),
            format!("<h1 class=\"{}\">Title</h1>", H1_CLASS)
        );
        assert_eq!(
            render_markdown("## Section"),
            format!("<h2 class=\"{}\">Section</h2>", H2_CLASS)
        );
        assert_eq!(
            render_markdown("### Sub"),
            format!("<h3 class=\"{}\">Sub</h3>", H3_CLASS)
        );
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let html = render_markdown("first para\nstill first\n\nsecond para");
        assert_eq!(
            html,
            format!(
                "<p class=\"{p}\">first para\nstill first</p><p class=\"{p}\">second para</p>",
                p = P_CLASS
            )
        );
    }

    #[test]
    fn test_bold_italic_nesting() {
        let html = render_markdown("***both*** **bold** *italic*");
        assert!(html.contains("<strong><em>both</em></strong>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_inline_code_is_not_styled_inside() {
        let html = render_markdown("use `**not bold**` here");
        assert!(html.contains(&format!(
            "<code class=\"{}\">**not bold**</code>",
            INLINE_CODE_CLASS
        )));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_fenced_code_block() {
        let html = render_markdown("```js\nlet x = 1 < 2;\n```");
        assert!(html.starts_with(&format!("<pre class=\"{}\">", PRE_CLASS)));
        assert!(html.contains("let x = 1 &lt; 2;"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_unclosed_fence_consumes_rest() {
        let html = render_markdown("```\ncode forever");
        assert!(html.contains("code forever"));
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_links_and_images() {
        let html = render_markdown("see [docs](https://example.com) and ![alt text](/img.png)");
        assert!(html.contains(&format!(
            "<a href=\"https://example.com\" class=\"{}\">docs</a>",
            LINK_CLASS
        )));
        assert!(html.contains(&format!(
            "<img src=\"/img.png\" alt=\"alt text\" class=\"{}\" />",
            IMG_CLASS
        )));
    }

    #[test]
    fn test_link_url_cannot_break_out_of_attribute() {
        let html = render_markdown("[x](https://e.com/\"onmouseover=\"alert(1))");
        assert!(!html.contains("onmouseover=\"alert"));
        assert!(html.contains("&quot;"));
    }

    #[test]
    fn test_blockquote_and_hr() {
        let html = render_markdown("> wisdom\n\n---");
        assert!(html.contains(&format!(
            "<blockquote class=\"{}\">wisdom</blockquote>",
            BLOCKQUOTE_CLASS
        )));
        assert!(html.contains(&format!("<hr class=\"{}\" />", HR_CLASS)));
    }

    #[test]
    fn test_list_items() {
        let html = render_markdown("- first\n- second\n\n1. one\n2. two");
        assert_eq!(html.matches("<li class=\"ml-4\">").count(), 2);
        assert_eq!(html.matches("<li class=\"ml-4 list-decimal\">").count(), 2);
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unmatched_delimiters_render_verbatim() {
        let html = render_markdown("a * lone star and `tick");
        assert!(html.contains("* lone star"));
        assert!(html.contains("`tick"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(render_markdown("\n\n\n"), "");
    }
}
