use crate::{Match, PatternSet, Symbol};

pub fn brute_force_positions<S: Symbol>(text: &[S], pattern: &[S]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(i, _)| i)
        .collect()
}

pub fn brute_force_matches<S: Symbol>(text: &[S], patterns: &PatternSet<S>) -> Vec<Match> {
    patterns
        .iter()
        .flat_map(|(id, pattern)| {
            brute_force_positions(text, pattern)
                .into_iter()
                .map(move |start| Match::new(id, start, start + pattern.len()))
        })
        .collect()
}

pub fn naive_wildcard_positions<S: Symbol>(
    text: &[S],
    pattern: &[S],
    wildcard: S,
    forbidden: Option<S>,
) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&start| {
            pattern.iter().zip(&text[start..]).all(|(&p, &t)| {
                if p == wildcard {
                    Some(t) != forbidden
                } else {
                    p == t
                }
            })
        })
        .collect()
}
