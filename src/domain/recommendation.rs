//! Recommendation model
//!
//! Recommendations are synthesized once per analysis from the aggregate
//! extraction result. Each rule carries a fixed priority and impact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecommendationId;
use super::task::Priority;

/// Kind of recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    /// Break down large tasks
    Task,
    /// Build skills the document calls for
    Learning,
    /// Rebalance a high-priority load
    Efficiency,
    /// Reserve focus time
    Time,
    /// Coordinate shared work
    Leadership,
    /// Hand work to an assistant agent (never produced by the synthesizer)
    Agent,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Task => "task",
            RecommendationType::Learning => "learning",
            RecommendationType::Efficiency => "efficiency",
            RecommendationType::Time => "time",
            RecommendationType::Leadership => "leadership",
            RecommendationType::Agent => "agent",
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthesized recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: RecommendationId,

    #[serde(rename = "type")]
    pub kind: RecommendationType,

    pub content: String,

    pub priority: Priority,

    /// 0-100
    pub impact: u8,

    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    /// Creates a recommendation; the ID is derived from type and content
    pub fn new(
        kind: RecommendationType,
        content: impl Into<String>,
        priority: Priority,
        impact: u8,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            id: RecommendationId::new(kind.as_str(), &content),
            kind,
            content,
            priority,
            impact: impact.min(100),
            timestamp,
        }
    }
}
