//! Task candidate model
//!
//! Task candidates are the units of work inferred from a document. They are
//! value objects: the engine creates them once per extraction run and never
//! mutates them afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Status of a task candidate
///
/// Extraction always produces `Todo`; the other states exist so callers can
/// round-trip candidates through their own storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// Priority level of a task candidate or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "normal" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Estimated complexity of a piece of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    #[default]
    Medium,
    High,
}

impl Complexity {
    /// Duration table: the only source of classifier-derived durations.
    ///
    /// `High` maps to 180 minutes, which is the ceiling for any estimate.
    pub const fn duration_minutes(self) -> u32 {
        match self {
            Complexity::Low => 45,
            Complexity::Medium => 90,
            Complexity::High => 180,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task inferred from a document
///
/// `index` is the position in extraction order. It is the identity used by
/// dependency inference, so it is only meaningful within a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCandidate {
    pub index: usize,

    pub title: String,

    pub description: String,

    pub status: TaskStatus,

    /// Complexity level the duration was derived from.
    ///
    /// `None` for candidates whose source declared a duration directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,

    pub estimated_duration_minutes: u32,

    pub actual_duration_minutes: u32,

    pub priority: Priority,

    pub tags: BTreeSet<String>,
}

impl TaskCandidate {
    /// Creates a candidate with the JSON-path defaults (60 minutes, medium, no tags)
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            complexity: None,
            estimated_duration_minutes: 60,
            actual_duration_minutes: 0,
            priority: Priority::Medium,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the complexity and the duration that the fixed table derives from it
    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self.estimated_duration_minutes = complexity.duration_minutes();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.complexity = None;
        self.estimated_duration_minutes = minutes;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the candidate counts as a large piece of work (two hours or more)
    pub fn is_large(&self) -> bool {
        self.estimated_duration_minutes >= 120
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_table() {
        assert_eq!(Complexity::Low.duration_minutes(), 45);
        assert_eq!(Complexity::Medium.duration_minutes(), 90);
        assert_eq!(Complexity::High.duration_minutes(), 180);
    }

    #[test]
    fn new_candidate_defaults() {
        let task = TaskCandidate::new(3, "Write docs");
        assert_eq!(task.index, 3);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.estimated_duration_minutes, 60);
        assert_eq!(task.actual_duration_minutes, 0);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.tags.is_empty());
        assert!(task.complexity.is_none());
    }

    #[test]
    fn complexity_sets_duration() {
        let task = TaskCandidate::new(0, "Migrate").with_complexity(Complexity::High);
        assert_eq!(task.estimated_duration_minutes, 180);
        assert!(task.is_large());

        let task = task.with_duration(30);
        assert_eq!(task.complexity, None);
        assert!(!task.is_large());
    }

    #[test]
    fn priority_parse() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("low".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let task = TaskCandidate::new(0, "T1").with_tags(["backend"]);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["estimatedDurationMinutes"], 60);
        assert_eq!(json["actualDurationMinutes"], 0);
        assert_eq!(json["status"], "todo");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["tags"], serde_json::json!(["backend"]));
        assert!(json.get("complexity").is_none());
    }
}
