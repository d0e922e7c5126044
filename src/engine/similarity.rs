//! Fuzzy task resolution
//!
//! Maps a captured phrase back to a candidate title. Exact equality always
//! wins; otherwise the best-scoring title is accepted only above the
//! threshold.

use std::collections::HashSet;

use crate::domain::TaskCandidate;

/// A score must be strictly greater than this to count as a match
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Tokens must be longer than this (in characters) to take part in Jaccard
pub const MIN_TOKEN_CHARS: usize = 3;

/// Scores two phrases in `[0, 1]`
///
/// When one lowercased phrase contains the other, the score is the ratio of
/// the shorter length to the longer. Otherwise it is the Jaccard index over
/// whitespace tokens longer than three characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.contains(&b) || b.contains(&a) {
        let (la, lb) = (a.chars().count(), b.chars().count());
        return la.min(lb) as f64 / la.max(lb) as f64;
    }

    let tokens = |s: &str| -> HashSet<String> {
        s.split_whitespace()
            .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    };
    let (ta, tb) = (tokens(&a), tokens(&b));

    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    ta.intersection(&tb).count() as f64 / union as f64
}

/// Resolves a phrase to the index of the best-matching candidate
///
/// Ties keep the earliest candidate.
pub fn resolve(phrase: &str, tasks: &[TaskCandidate]) -> Option<usize> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }

    if let Some(task) = tasks.iter().find(|t| t.title.trim() == phrase) {
        return Some(task.index);
    }

    let mut best: Option<(usize, f64)> = None;
    for task in tasks {
        let score = similarity(phrase, &task.title);
        if score > MATCH_THRESHOLD && best.map_or(true, |(_, b)| score > b) {
            best = Some((task.index, score));
        }
    }

    best.map(|(index, _)| index)
}
