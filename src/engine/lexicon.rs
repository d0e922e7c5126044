//! Keyword tables used by the lexical classifiers and the synthesizer
//!
//! All terms are lowercase and matched as substrings of lowercased text.
//! Order inside a table does not matter; order between tables is decided by
//! the classifier that consults them.

/// Terms that mark a span as high complexity
pub const HIGH_COMPLEXITY: &[&str] = &[
    "complex",
    "challenging",
    "critical",
    "difficult",
    "extensive",
    "comprehensive",
    "architecture",
    "redesign",
    "overhaul",
    "refactor",
    "migrate",
    "migration",
    "integrate",
    "integration",
];

/// Terms that mark a span as low complexity
pub const LOW_COMPLEXITY: &[&str] = &[
    "simple",
    "quick",
    "minor",
    "easy",
    "trivial",
    "straightforward",
    "small",
    "typo",
    "tweak",
];

/// Deadline phrases; checked before any other priority cue
pub const DEADLINE_URGENCY: &[&str] = &[
    "deadline",
    "overdue",
    "by end of day",
    "due tomorrow",
    "due today",
    "past due",
];

/// Terms that mark a span as high priority
pub const HIGH_PRIORITY: &[&str] = &[
    "urgent",
    "asap",
    "blocker",
    "blocking",
    "critical",
    "important",
    "high priority",
    "p0",
    "p1",
];

/// Terms that mark a span as low priority
pub const LOW_PRIORITY: &[&str] = &[
    "optional",
    "nice to have",
    "nice-to-have",
    "backlog",
    "someday",
    "low priority",
    "when possible",
    "p3",
    "p4",
];

/// Skill domains and the keywords that imply them
pub const SKILL_DOMAINS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &["frontend", "front-end", "user interface", "css", "html", "react", "component", "layout", "styling"],
    ),
    (
        "backend",
        &["backend", "back-end", "api", "server", "database", "endpoint", "schema", "query"],
    ),
    (
        "documentation",
        &["documentation", "docs", "readme", "document", "write-up", "guide", "wiki"],
    ),
    (
        "testing",
        &["test", "coverage", "e2e", "verify", "validation"],
    ),
    ("bug", &["bug", "fix", "error", "crash", "defect", "regression"]),
    (
        "feature",
        &["feature", "implement", "enhancement", "introduce", "support for"],
    ),
];

/// Words that suggest shared ownership of the work
pub const TEAM_TERMS: &[&str] = &["team", "collaborate", "delegate", "assign"];

/// Document-level insight checks: any keyword present contributes the insight once
pub const INSIGHT_RULES: &[(&[&str], &str)] = &[
    (
        &["objective", "goal"],
        "Document outlines clear objectives and goals",
    ),
    (
        &["deadline", "due date", "timeline", "milestone"],
        "Time-sensitive deliverables identified; track the key dates",
    ),
    (
        &["requirement", "must have", "specification"],
        "Specific requirements are documented; use them as acceptance criteria",
    ),
    (
        &["stakeholder", "client", "customer"],
        "Stakeholders are involved; plan regular status updates",
    ),
    (
        &["budget", "cost", "expense"],
        "Budget considerations are present; monitor spend against plan",
    ),
    (
        &["depends on", "dependency", "dependencies", "blocked by", "prerequisite"],
        "Task dependencies detected; sequence the work accordingly",
    ),
    (
        &["team", "collaborate", "collaboration"],
        "Team collaboration is required; clarify ownership early",
    ),
];

/// Emitted when no insight rule matches
pub const DEFAULT_INSIGHT: &str = "Document processed; no specific planning signals detected";
