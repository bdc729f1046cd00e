//! Search match highlighting
//!
//! Locates every occurrence of a query inside a piece of text and wraps
//! the matched ranges in `<mark>` tags. Matching is independent of the
//! search engine's scoring: the engine decides which posts to show, this
//! module decorates their titles and excerpts for display.
//!
//! Both the text and the query are HTML-escaped before any markup is
//! injected, so neither source can smuggle tags into the output.

/// Fixed styling for highlighted ranges.
const MARK_OPEN: &str = "<mark class=\"bg-primary/30 text-foreground px-0.5 rounded\">";
const MARK_CLOSE: &str = "</mark>";

/// A matched character range in the source text. Half-open: `start` is
/// inclusive, `end` exclusive. Offsets are character indices, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

/// Escape `&`, `<`, `>` and `"` for safe inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Highlight occurrences of `query` inside `text`.
///
/// Finds every occurrence of the full query (case-insensitive), plus any
/// text word that starts with one of the query's words (two characters
/// or longer — single letters highlight too aggressively). Overlapping
/// ranges are merged before rendering. The result is always fully
/// escaped; with a blank query or no matches it is simply the escaped
/// input.
pub fn highlight_matches(text: &str, query: &str) -> String {
    if query.trim().is_empty() || text.is_empty() {
        return escape_html(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let lower = fold_lowercase(&chars);

    let query_chars: Vec<char> = query.chars().collect();
    let query_lower = fold_lowercase(&query_chars);

    let mut spans = Vec::new();

    // Full-query occurrences. The scan resumes one character after each
    // match start so adjacent and overlapping occurrences are all found.
    let mut from = 0;
    while let Some(pos) = find_from(&lower, &query_lower, from) {
        spans.push(Span {
            start: pos,
            end: pos + query_lower.len(),
        });
        from = pos + 1;
    }

    // Word-prefix matches: a text word starting with a query word gets
    // just the matching prefix highlighted.
    let query_words: Vec<&[char]> = split_words(&query_lower)
        .into_iter()
        .filter(|(_, w)| w.len() >= 2)
        .map(|(_, w)| w)
        .collect();

    for (start, word) in split_words(&lower) {
        for qw in &query_words {
            if word.len() >= qw.len() && &word[..qw.len()] == *qw {
                spans.push(Span {
                    start,
                    end: start + qw.len(),
                });
            }
        }
    }

    if spans.is_empty() {
        return escape_html(text);
    }

    // Merge overlapping and adjacent spans
    spans.sort_by_key(|s| s.start);
    let mut merged: Vec<Span> = Vec::new();
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }

    // Escaped gaps, marked escaped spans, in order
    let mut out = String::new();
    let mut last_end = 0;
    for span in merged {
        out.push_str(&escape_html(&collect_range(&chars, last_end, span.start)));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(&collect_range(&chars, span.start, span.end)));
        out.push_str(MARK_CLOSE);
        last_end = span.end;
    }
    out.push_str(&escape_html(&collect_range(&chars, last_end, chars.len())));

    out
}

/// Lowercase character-by-character, keeping a 1:1 index mapping with
/// the input (multi-character expansions are truncated to their first
/// character so span offsets stay valid).
fn fold_lowercase(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|&c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Find `needle` in `haystack` at or after `from`. Returns the start index.
fn find_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || from + needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Split into whitespace-delimited words, keeping each word's start index.
fn split_words(chars: &[char]) -> Vec<(usize, &[char])> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        words.push((start, &chars[start..i]));
    }
    words
}

fn collect_range(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(text: &str) -> String {
        format!("{}{}{}", MARK_OPEN, text, MARK_CLOSE)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"a\" & b</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; b&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_blank_query_returns_escaped_text() {
        assert_eq!(highlight_matches("a < b", ""), "a &lt; b");
        assert_eq!(highlight_matches("a < b", "   "), "a &lt; b");
        assert_eq!(highlight_matches("", "query"), "");
    }

    #[test]
    fn test_simple_match_preserves_case() {
        let out = highlight_matches("The Bug That Haunts Me", "bug");
        assert_eq!(out, format!("The {} That Haunts Me", mark("Bug")));
    }

    #[test]
    fn test_no_match_returns_escaped_text() {
        let out = highlight_matches("nothing here <tag>", "zzz");
        assert_eq!(out, "nothing here &lt;tag&gt;");
    }

    #[test]
    fn test_multiple_occurrences() {
        let out = highlight_matches("css and more css", "css");
        assert_eq!(
            out,
            format!("{} and more {}", mark("css"), mark("css"))
        );
    }

    #[test]
    fn test_overlapping_occurrences_are_merged() {
        // "aaa" in "aaaa" matches at 0 and 1; the spans merge into one
        let out = highlight_matches("aaaa", "aaa");
        assert_eq!(out, mark("aaaa"));
    }

    #[test]
    fn test_word_prefix_highlights_prefix_only() {
        let out = highlight_matches("debugging session", "debug");
        assert_eq!(out, format!("{}ging session", mark("debug")));
    }

    #[test]
    fn test_short_query_words_are_ignored_for_prefixes() {
        // Single-character query words do not trigger prefix matches,
        // but the full query still matches as a substring.
        let out = highlight_matches("x marks the spot", "x");
        assert_eq!(out, format!("{} marks the spot", mark("x")));
    }

    #[test]
    fn test_multi_word_query() {
        // The full query matches as a substring and both words
        // prefix-match their targets; everything merges into one span.
        let out = highlight_matches("race condition on tuesdays", "race cond");
        assert_eq!(out, format!("{}ition on tuesdays", mark("race cond")));
    }

    #[test]
    fn test_escaping_applies_inside_and_outside_marks() {
        let out = highlight_matches("a<b and a<c", "a<b");
        assert_eq!(out, format!("{} and a&lt;c", mark("a&lt;b")));
    }

    #[test]
    fn test_query_is_escaped_not_interpreted() {
        // A query full of markup never injects tags into the output
        let out = highlight_matches("hello world", "<mark>");
        assert_eq!(out, "hello world");
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let out = highlight_matches("café société", "café");
        assert_eq!(out, format!("{} société", mark("café")));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let out = highlight_matches("TypeScript Tips", "typescript");
        assert_eq!(out, format!("{} Tips", mark("TypeScript")));
    }
}
