//! Fuzzy search and ranking
//!
//! Ranks posts (or anything else) against a free-text query. Each item
//! exposes a set of searchable fields; the best-matching field decides
//! the item's score. Scores live in (0.3, 1.0] — anything at or below
//! the floor is dropped from the results.
//!
//! Everything here is a pure function over in-memory data. The caller
//! is expected to hold a snapshot of its items and re-run the search per
//! keystroke; there is no index to build or invalidate.

/// A search hit together with its relevance score.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyResult<T> {
    /// The matched item
    pub item: T,
    /// Relevance in (0.3, 1.0]
    pub score: f64,
}

/// Items scoring at or below this are excluded from results.
const SCORE_FLOOR: f64 = 0.3;

/// Scale applied to raw similarity when no direct/prefix match fired.
const SIMILARITY_SCALE: f64 = 0.7;

/// Minimum raw similarity worth keeping as a fallback match.
const SIMILARITY_CUTOFF: f64 = 0.4;

/// Classic dynamic-programming edit distance (substitution, insertion,
/// deletion at unit cost; no transpositions). Operates on characters,
/// not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row DP: prev holds row i-1, curr is being filled for row i.
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr: Vec<usize> = vec![0; a.len() + 1];

    for i in 1..=b.len() {
        curr[0] = i;
        for j in 1..=a.len() {
            let cost = if b[i - 1] == a[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j - 1] + cost)
                .min(curr[j - 1] + 1)
                .min(prev[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

/// Similarity score between two strings, in `[0, 1]`.
///
/// Case-insensitive. Checks are layered: exact match, containment in
/// either direction, word-prefix overlap, and finally normalized edit
/// distance. The first layer that applies wins.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    // Exact match
    if a_lower == b_lower {
        return 1.0;
    }

    // Containment, asymmetric: finding the needle inside the haystack
    // is rewarded slightly more than the reverse.
    if a_lower.contains(&b_lower) {
        return 0.9;
    }
    if b_lower.contains(&a_lower) {
        return 0.85;
    }

    // Word-boundary prefix pairs
    let mut word_match_score = 0.0;
    for b_word in b_lower.split_whitespace() {
        for a_word in a_lower.split_whitespace() {
            if a_word.starts_with(b_word) || b_word.starts_with(a_word) {
                word_match_score += 0.3;
            }
        }
    }
    if word_match_score > 0.0 {
        return f64::min(0.8, 0.5 + word_match_score);
    }

    // Normalized edit distance
    let max_len = a_lower.chars().count().max(b_lower.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a_lower, &b_lower);
    f64::max(0.0, 1.0 - distance as f64 / max_len as f64)
}

/// Rank `items` against `query`.
///
/// `searchable` extracts the fields to match for each item (empty fields
/// are skipped). An item's score is the maximum over its fields, scored
/// by a layered policy: substring containment (weighted by how much of
/// the field the query covers), then word-prefix matches, then scaled
/// raw similarity. Items at or below the inclusion floor are dropped.
///
/// Results are sorted by descending score; equal scores keep their input
/// order. The full ranked set is returned — truncation to a display
/// limit is the caller's job.
pub fn fuzzy_search<T, F>(items: Vec<T>, query: &str, searchable: F) -> Vec<FuzzyResult<T>>
where
    F: Fn(&T) -> Vec<String>,
{
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let query_len = query_lower.chars().count();

    let mut results = Vec::new();

    for item in items {
        let mut max_score: f64 = 0.0;

        for field in searchable(&item) {
            if field.is_empty() {
                continue;
            }

            let field_lower = field.to_lowercase();

            let score = if field_lower.contains(&query_lower) {
                // Direct containment: reward queries that cover a larger
                // fraction of the field.
                let field_len = field_lower.chars().count();
                0.9 + (query_len as f64 / field_len as f64) * 0.1
            } else if field_lower.split_whitespace().any(|word| {
                word.starts_with(&query_lower)
                    || query_lower.starts_with(&word.chars().take(3).collect::<String>())
            }) {
                0.75
            } else {
                let sim = similarity(&field, query);
                if sim > SIMILARITY_CUTOFF {
                    sim * SIMILARITY_SCALE
                } else {
                    0.0
                }
            };

            max_score = max_score.max(score);
        }

        if max_score > SCORE_FLOOR {
            results.push(FuzzyResult {
                item,
                score: max_score,
            });
        }
    }

    // Stable sort: ties keep their original input order.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results
}
