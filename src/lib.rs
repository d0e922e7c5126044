//! taskdraft - Document-to-task extraction
//!
//! Turns free-form project documentation (markdown, plain text, or JSON)
//! into candidate tasks with complexity, priority, duration and skill tags,
//! infers ordering dependencies from textual cues, and synthesizes
//! recommendations from the result.
//!
//! ```
//! use taskdraft::{extract, ContentCategory};
//!
//! let result = extract("- Write docs\n- Publish docs after Write docs", ContentCategory::Markdown);
//! assert_eq!(result.tasks.len(), 2);
//! assert_eq!(result.dependencies.dependencies(1).into_iter().collect::<Vec<_>>(), [0]);
//!
//! // The declared type may also be given as text, e.g. a MIME type
//! let result = extract("{\"tasks\": [{\"title\": \"Ship\"}]}", "application/json");
//! assert_eq!(result.tasks[0].title, "Ship");
//! ```

pub mod domain;
pub mod engine;
pub mod storage;
pub mod cli;

pub use domain::{
    Complexity, ContentCategory, DependencyEdge, DependencyGraph, Document, Priority, Recommendation,
    RecommendationType, TaskCandidate, TaskStatus,
};
pub use engine::{analyze, analyze_at, extract, extract_document, Analysis, ExtractionResult};
