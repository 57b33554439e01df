//! Typo correction against the indexed vocabulary.
//!
//! Every candidate term is compared with a full Levenshtein computation, so a lookup costs
//! O(|vocabulary| x |word| x |term|). That is fine for site-sized vocabularies and the main
//! latency risk for large ones.

use std::cmp::min;

/// Largest edit distance still accepted as a correction.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Unit-cost insert/delete/substitute distance between two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = min(min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest vocabulary term within [`MAX_EDIT_DISTANCE`] of `word`.
///
/// Ties go to the first term at the minimum distance in iteration order; the engine's
/// vocabulary iterates in lexicographic order.
pub fn find_closest_term<'a, I>(word: &str, vocabulary: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let word_len = word.chars().count();
    let mut best: Option<(&'a str, usize)> = None;
    for term in vocabulary {
        // Terms whose length differs by more than the threshold can never be accepted.
        if term.chars().count().abs_diff(word_len) > MAX_EDIT_DISTANCE {
            continue;
        }
        let distance = levenshtein(word, term);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((term, distance));
        }
    }
    best.filter(|(_, d)| *d <= MAX_EDIT_DISTANCE).map(|(term, _)| term)
}
