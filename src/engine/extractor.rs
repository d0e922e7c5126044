//! Candidate task extraction
//!
//! Every non-empty list item in a normalized body becomes one candidate, in
//! document order. The candidate index is the item's position among
//! non-empty items, the same index dependency inference resolves to.

use super::classify;
use super::normalize::NormalizedBody;
use crate::domain::TaskCandidate;

/// Description given to every list-item candidate
pub fn candidate_description(title: &str) -> String {
    format!("Task extracted from document: {}", title)
}

/// Builds annotated candidates from the list items of a body
pub fn extract_candidates(body: &NormalizedBody) -> Vec<TaskCandidate> {
    body.list_items()
        .filter_map(|span| {
            let index = span.candidate?;
            let c = classify::classify(&span.text);

            Some(
                TaskCandidate::new(index, span.text.clone())
                    .with_description(candidate_description(&span.text))
                    .with_complexity(c.complexity)
                    .with_priority(c.priority)
                    .with_tags(c.tags),
            )
        })
        .collect()
}
