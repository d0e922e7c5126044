//! Domain models for taskdraft
//!
//! Contains the value objects exchanged with callers, without any I/O concerns.

mod id;
mod task;
mod document;
mod graph;
mod recommendation;

pub use id::{RecommendationId, IdError};
pub use task::{Complexity, Priority, TaskCandidate, TaskStatus};
pub use document::{ContentCategory, Document};
pub use graph::{DependencyEdge, DependencyGraph, GraphError};
pub use recommendation::{Recommendation, RecommendationType};
