//! Dual-measure fuzzy similarity
//!
//! Whole-string edit distance penalizes legitimate word-order variation
//! ("Design Museum Denmark" vs "denmark design museum"), while word-set
//! matching alone is too permissive on single-word substrings. The effective
//! score is the max of both, with asymmetric guards inside the word-set
//! measure tuned against known false positives.

use crate::normalize::{normalize, significant_words};

/// Shorter token must be at least this long to count as a substring match.
const SUBSTRING_MIN_LEN: usize = 4;
/// Length ratio guard for substring containment; rejects "nice" inside
/// "venice" (4/6 ≈ 0.67).
const SUBSTRING_LEN_RATIO: f32 = 0.7;
/// Per-token edit similarity needed to align two non-equal tokens.
const TOKEN_EDIT_SIM: f32 = 0.85;

/// Levenshtein distance over chars, two-row formulation.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

fn edit_similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

/// Whole-string measure: normalized edit-distance similarity.
pub fn string_similarity(a: &str, b: &str) -> f32 {
    edit_similarity(&normalize(a), &normalize(b))
}

/// Substring containment, guarded so that short tokens and lopsided length
/// ratios never align ("nice" must not match inside "venice").
fn substring_aligned(a: &str, b: &str) -> bool {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    let long_len = long.chars().count();
    short_len >= SUBSTRING_MIN_LEN
        && short_len as f32 / long_len as f32 >= SUBSTRING_LEN_RATIO
        && long.contains(short)
}

/// Word-set measure: greedy one-to-one alignment of significant words, in
/// three precedence passes (exact, guarded substring, per-token edit
/// similarity). Scores land in [0, 1] with a 0.85 floor once every word of
/// the shorter side is matched.
pub fn word_set_similarity(a: &str, b: &str) -> f32 {
    let a_words = significant_words(a);
    let b_words = significant_words(b);
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }

    let mut a_used = vec![false; a_words.len()];
    let mut b_used = vec![false; b_words.len()];
    let mut matched = 0usize;

    // Pass order matters: exact equality wins a slot before a substring or
    // typo alignment can claim it. One alignment per word on each side.
    for pass in 0..3 {
        for (i, a_word) in a_words.iter().enumerate() {
            if a_used[i] {
                continue;
            }
            let found = b_words.iter().enumerate().position(|(j, b_word)| {
                !b_used[j]
                    && match pass {
                        0 => a_word == b_word,
                        1 => a_word != b_word && substring_aligned(a_word, b_word),
                        _ => edit_similarity(a_word, b_word) > TOKEN_EDIT_SIM,
                    }
            });
            if let Some(j) = found {
                a_used[i] = true;
                b_used[j] = true;
                matched += 1;
            }
        }
    }

    let total = a_words.len().max(b_words.len());
    let shorter = a_words.len().min(b_words.len());
    let ratio = matched as f32 / total as f32;
    if matched >= shorter {
        0.85 + 0.15 * ratio
    } else {
        ratio
    }
}

/// Effective similarity: the max of the two measures, in [0, 1].
pub fn similarity(a: &str, b: &str) -> f32 {
    string_similarity(a, b)
        .max(word_set_similarity(a, b))
        .clamp(0.0, 1.0)
}
