//! Lexical classifiers
//!
//! Four independent pure functions over a single text span: complexity,
//! duration, priority and tags. Complexity and priority apply their rules in
//! a fixed order and the first rule that fires wins; the order is part of the
//! contract and is tested as such.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::lexicon;
use crate::domain::{Complexity, Priority};

/// A day or week unit as a whole word, e.g. "2 days", "takes weeks"
static DAY_WEEK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?i)\b(?:days?|weeks?)\b") {
        Ok(regex) => regex,
        Err(err) => panic!("day/week regex is invalid: {err}"),
    }
});

/// A number followed by an hour unit, e.g. "3 hours", "2hrs"
static HOUR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)\b") {
        Ok(regex) => regex,
        Err(err) => panic!("hour regex is invalid: {err}"),
    }
});

/// A hash-mark token at the start of the span or after whitespace
static HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?:^|\s)#(\w[\w-]*)") {
        Ok(regex) => regex,
        Err(err) => panic!("hashtag regex is invalid: {err}"),
    }
});

/// Spans longer than this (in characters) default to medium complexity
const LONG_SPAN_CHARS: usize = 100;

/// The complexity rule that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityCue {
    DaysOrWeeks,
    Hours,
    HighTerm,
    LowTerm,
    LongSpan,
    Default,
}

/// The priority rule that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityCue {
    Deadline,
    HighTerm,
    LowTerm,
    Default,
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}

/// Estimates complexity and reports which rule decided it
pub fn complexity_with_cue(span: &str) -> (Complexity, ComplexityCue) {
    if DAY_WEEK_PATTERN.is_match(span) {
        return (Complexity::High, ComplexityCue::DaysOrWeeks);
    }

    // Mentions under an hour say nothing; the first of an hour or more decides
    if let Some(hours) = HOUR_PATTERN
        .captures_iter(span)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .find(|hours| *hours >= 1.0)
    {
        if hours >= 3.0 {
            return (Complexity::High, ComplexityCue::Hours);
        }
        return (Complexity::Medium, ComplexityCue::Hours);
    }

    let lower = span.to_lowercase();

    if contains_any(&lower, lexicon::HIGH_COMPLEXITY) {
        return (Complexity::High, ComplexityCue::HighTerm);
    }

    if contains_any(&lower, lexicon::LOW_COMPLEXITY) {
        return (Complexity::Low, ComplexityCue::LowTerm);
    }

    if span.chars().count() > LONG_SPAN_CHARS {
        return (Complexity::Medium, ComplexityCue::LongSpan);
    }

    (Complexity::Medium, ComplexityCue::Default)
}

/// Estimates the complexity of a span
pub fn complexity(span: &str) -> Complexity {
    complexity_with_cue(span).0
}

/// Maps complexity to minutes: low 45, medium 90, high 180
pub fn duration_minutes(complexity: Complexity) -> u32 {
    complexity.duration_minutes()
}

/// Classifies priority and reports which rule decided it
pub fn priority_with_cue(span: &str) -> (Priority, PriorityCue) {
    let lower = span.to_lowercase();

    if contains_any(&lower, lexicon::DEADLINE_URGENCY) {
        (Priority::High, PriorityCue::Deadline)
    } else if contains_any(&lower, lexicon::HIGH_PRIORITY) {
        (Priority::High, PriorityCue::HighTerm)
    } else if contains_any(&lower, lexicon::LOW_PRIORITY) {
        (Priority::Low, PriorityCue::LowTerm)
    } else {
        (Priority::Medium, PriorityCue::Default)
    }
}

/// Classifies the priority of a span
pub fn priority(span: &str) -> Priority {
    priority_with_cue(span).0
}

/// Extracts lowercase tags: explicit `#hashtags` plus matching skill domains
pub fn tags(span: &str) -> BTreeSet<String> {
    let mut out: BTreeSet<String> = HASHTAG_PATTERN
        .captures_iter(span)
        .map(|caps| caps[1].to_lowercase())
        .collect();

    let lower = span.to_lowercase();
    for (domain, keywords) in lexicon::SKILL_DOMAINS {
        if contains_any(&lower, keywords) {
            out.insert((*domain).to_string());
        }
    }

    out
}

/// All four classifier outputs for one span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub complexity: Complexity,
    pub complexity_cue: ComplexityCue,
    pub estimated_duration_minutes: u32,
    pub priority: Priority,
    pub priority_cue: PriorityCue,
    pub tags: BTreeSet<String>,
}

/// Runs every classifier over a span
pub fn classify(span: &str) -> Classification {
    let (complexity, complexity_cue) = complexity_with_cue(span);
    let (priority, priority_cue) = priority_with_cue(span);

    Classification {
        complexity,
        complexity_cue,
        estimated_duration_minutes: duration_minutes(complexity),
        priority,
        priority_cue,
        tags: tags(span),
    }
}
