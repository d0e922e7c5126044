//! Document-to-task extraction engine
//!
//! Raw content and a declared category go through the router; list items
//! become candidates, ordering phrases become dependency edges, and the
//! synthesizer summarizes the result. Everything here is synchronous and
//! deterministic except the recommendation timestamp.

pub mod classify;
pub mod dependency;
pub mod extractor;
pub mod lexicon;
pub mod normalize;
pub mod router;
pub mod similarity;
pub mod synthesis;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::{ContentCategory, DependencyGraph, Document, Recommendation, TaskCandidate};
use router::Routed;

/// Title reported when structured input cannot be parsed
pub const PARSING_ERROR_TITLE: &str = "Parsing Error";

/// Everything extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,

    pub description: String,

    pub tasks: Vec<TaskCandidate>,

    /// Serialized as task index -> indices it depends on
    pub dependencies: DependencyGraph,

    pub insights: Vec<String>,

    pub suggested_skills: BTreeSet<String>,

    /// Sum of candidate durations
    pub estimated_effort_minutes: u64,
}

impl ExtractionResult {
    fn new(title: impl Into<String>, description: impl Into<String>, tasks: Vec<TaskCandidate>) -> Self {
        let dependencies = DependencyGraph::new(tasks.len());
        let estimated_effort_minutes = total_effort(&tasks);
        Self {
            title: title.into(),
            description: description.into(),
            tasks,
            dependencies,
            insights: Vec::new(),
            suggested_skills: BTreeSet::new(),
            estimated_effort_minutes,
        }
    }

    fn parsing_error(cause: &str) -> Self {
        Self::new(PARSING_ERROR_TITLE, cause, Vec::new())
    }

    /// Returns true if the document could not be parsed
    pub fn is_parsing_error(&self) -> bool {
        self.title == PARSING_ERROR_TITLE && self.tasks.is_empty()
    }
}

/// Recommendations layered on an extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub recommendations: Vec<Recommendation>,

    pub tasks: Vec<TaskCandidate>,

    pub insights: Vec<String>,

    pub suggested_skills: BTreeSet<String>,

    pub estimated_effort_minutes: u64,
}

fn total_effort(tasks: &[TaskCandidate]) -> u64 {
    tasks.iter().map(|t| u64::from(t.estimated_duration_minutes)).sum()
}

/// Extracts tasks from raw content declared as `declared_type`
///
/// `declared_type` is a [`ContentCategory`] or free text such as a MIME type
/// (`"text/markdown"`); text goes through [`ContentCategory::from_declared`].
/// Never fails: unparsable input yields a "Parsing Error" result and
/// unsupported categories yield a placeholder.
pub fn extract(content: &str, declared_type: impl Into<ContentCategory>) -> ExtractionResult {
    extract_document(&Document::new(content, declared_type.into()))
}

/// Extracts tasks from a document
pub fn extract_document(doc: &Document) -> ExtractionResult {
    let routed = match router::route(doc) {
        Ok(routed) => routed,
        Err(e) => {
            tracing::warn!("Failed to parse {} document: {}", doc.declared_type, e);
            return ExtractionResult::parsing_error(&e.to_string());
        }
    };

    let mut result = match routed {
        Routed::Body(body) => {
            let tasks = extractor::extract_candidates(&body);
            let dependencies = dependency::infer(&body, &tasks);

            let mut result = ExtractionResult::new(
                body.title().unwrap_or(router::UNTITLED_DOCUMENT),
                body.description().unwrap_or_default(),
                tasks,
            );
            result.dependencies = dependencies;
            result
        }
        Routed::Structured {
            title,
            description,
            tasks,
        } => ExtractionResult::new(title, description, tasks),
        Routed::Placeholder(category) => ExtractionResult::new(
            router::placeholder_title(category),
            router::placeholder_description(category),
            Vec::new(),
        ),
    };

    result.insights = synthesis::insights(&doc.raw_content);
    result.suggested_skills = synthesis::suggested_skills(&doc.raw_content);

    tracing::debug!(
        "Extracted {} tasks, {} dependencies from {} document",
        result.tasks.len(),
        result.dependencies.edge_count(),
        doc.declared_type
    );

    result
}

/// Extracts and synthesizes recommendations, stamped with the current time
pub fn analyze(content: &str, declared_type: impl Into<ContentCategory>) -> Analysis {
    analyze_at(content, declared_type, Utc::now())
}

/// Extracts and synthesizes recommendations, stamped with `now`
pub fn analyze_at(
    content: &str,
    declared_type: impl Into<ContentCategory>,
    now: DateTime<Utc>,
) -> Analysis {
    let result = extract(content, declared_type);
    let recommendations = synthesis::recommendations(&result.tasks, content, now);

    tracing::debug!("Synthesized {} recommendations", recommendations.len());

    Analysis {
        recommendations,
        tasks: result.tasks,
        insights: result.insights,
        suggested_skills: result.suggested_skills,
        estimated_effort_minutes: result.estimated_effort_minutes,
    }
}
