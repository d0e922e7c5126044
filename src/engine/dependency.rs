//! Dependency inference
//!
//! Scans normalized spans for ordering phrases and resolves both sides of
//! each match to a candidate index. Matches whose sides do not resolve, or
//! resolve to the same candidate, are dropped without error.

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

use super::normalize::{NormalizedBody, Span, SpanKind};
use super::similarity;
use crate::domain::{DependencyGraph, TaskCandidate};

/// The phrase family that produced a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// "A depends on B"
    DependsOn,
    /// "after A, B" or "B after A"
    After,
    /// "A requires B first"
    RequiresFirst,
    /// "A blocked by B"
    BlockedBy,
    /// "complete A before B"
    CompleteBefore,
    /// "A follows B"
    Follows,
}

struct Pattern {
    relation: Relation,
    regex: Regex,
}

fn compile(relation: Relation, pattern: &str) -> Pattern {
    match Regex::new(pattern) {
        Ok(regex) => Pattern { relation, regex },
        Err(err) => panic!("{:?} pattern is invalid: {err}", relation),
    }
}

/// Every pattern names its sides `dependent` and `prereq`. The two `after`
/// forms share a relation; the leading form is tried first.
static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        compile(
            Relation::DependsOn,
            r"(?i)(?P<dependent>.+?)\s+depends\s+on\s+(?P<prereq>.+)",
        ),
        compile(
            Relation::After,
            r"(?i)\bafter\s+(?P<prereq>[^,]+?)\s*,\s*(?P<dependent>.+)",
        ),
        compile(
            Relation::After,
            r"(?i)(?P<dependent>.+?)\s+after\s+(?P<prereq>.+)",
        ),
        compile(
            Relation::RequiresFirst,
            r"(?i)(?P<dependent>.+?)\s+requires\s+(?P<prereq>.+?)\s+first\b",
        ),
        compile(
            Relation::BlockedBy,
            r"(?i)(?P<dependent>.+?)\s+(?:is\s+)?blocked\s+by\s+(?P<prereq>.+)",
        ),
        compile(
            Relation::CompleteBefore,
            r"(?i)\bcomplete\s+(?P<prereq>.+?)\s+before\s+(?P<dependent>.+)",
        ),
        compile(
            Relation::Follows,
            r"(?i)(?P<dependent>.+?)\s+follows\s+(?P<prereq>.+)",
        ),
    ]
});

/// Sentence boundary inside a span
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[.!?;]\s+") {
    Ok(regex) => regex,
    Err(err) => panic!("sentence regex is invalid: {err}"),
});

/// A resolved phrase match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredDependency {
    pub from_index: usize,
    pub to_index: usize,
    pub relation: Relation,
}

/// Builds the dependency graph for one extraction run
pub fn infer(body: &NormalizedBody, tasks: &[TaskCandidate]) -> DependencyGraph {
    let mut graph = DependencyGraph::new(tasks.len());

    for dep in find_dependencies(body, tasks) {
        match graph.add_dependency(dep.from_index, dep.to_index) {
            Ok(true) => tracing::debug!(
                "Inferred {} -> {} ({:?})",
                dep.from_index,
                dep.to_index,
                dep.relation
            ),
            Ok(false) => {}
            Err(e) => tracing::debug!("Dropped inferred dependency: {}", e),
        }
    }

    graph
}

/// Lists every resolved match in document order, duplicates included
pub fn find_dependencies(body: &NormalizedBody, tasks: &[TaskCandidate]) -> Vec<InferredDependency> {
    let mut found = Vec::new();
    if tasks.len() < 2 {
        return found;
    }

    for span in &body.spans {
        if span.text.is_empty() || matches!(span.kind, SpanKind::Heading { .. }) {
            continue;
        }

        for (offset, sentence) in sentences(&span.text) {
            let mut matched: Vec<Relation> = Vec::new();

            for pattern in PATTERNS.iter() {
                if matched.contains(&pattern.relation) {
                    continue;
                }
                let Some(caps) = pattern.regex.captures(sentence) else {
                    continue;
                };
                matched.push(pattern.relation);

                let dependent = resolve_side(&caps, "dependent", offset, span, tasks);
                let prereq = resolve_side(&caps, "prereq", offset, span, tasks);

                match (dependent, prereq) {
                    (Some(from), Some(to)) if from != to => found.push(InferredDependency {
                        from_index: from,
                        to_index: to,
                        relation: pattern.relation,
                    }),
                    _ => tracing::debug!("Unresolved {:?} match in {:?}", pattern.relation, sentence),
                }
            }
        }
    }

    found
}

/// Splits a span into sentences with their byte offsets
fn sentences(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BREAK.find_iter(text) {
        out.push((start, &text[start..m.start()]));
        start = m.end();
    }
    if start < text.len() {
        out.push((start, &text[start..]));
    }
    out
}

/// Resolves one captured side to a candidate
///
/// A side that opens a list item falls back to that item's own candidate
/// when no title matches it.
fn resolve_side(
    caps: &Captures<'_>,
    group: &str,
    offset: usize,
    span: &Span,
    tasks: &[TaskCandidate],
) -> Option<usize> {
    let m = caps.name(group)?;
    let phrase = clean_phrase(m.as_str());

    similarity::resolve(phrase, tasks).or_else(|| {
        if offset + m.start() == 0 && span.kind == SpanKind::ListItem {
            span.candidate
        } else {
            None
        }
    })
}

/// Trims whitespace and trailing punctuation from a captured side
fn clean_phrase(raw: &str) -> &str {
    raw.trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .trim_end()
}
