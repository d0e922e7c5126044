//! Insight and recommendation synthesis
//!
//! Each rule looks at the candidates or the raw text on its own; rules are
//! additive and never suppress each other.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use super::{classify, lexicon};
use crate::domain::{Priority, Recommendation, RecommendationType, TaskCandidate};

/// More high-priority candidates than this triggers an efficiency recommendation
const HIGH_PRIORITY_LIMIT: usize = 3;

/// More candidates than this triggers a time recommendation
const TASK_COUNT_LIMIT: usize = 5;

/// Tags found anywhere in the text: hashtags plus skill domains
pub fn suggested_skills(raw: &str) -> BTreeSet<String> {
    classify::tags(raw)
}

/// Insight strings for the planning signals present in the text
pub fn insights(raw: &str) -> Vec<String> {
    let lower = raw.to_lowercase();
    let found: Vec<String> = lexicon::INSIGHT_RULES
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, insight)| (*insight).to_string())
        .collect();

    if found.is_empty() {
        vec![lexicon::DEFAULT_INSIGHT.to_string()]
    } else {
        found
    }
}

/// Produces recommendations from candidates and raw text
pub fn recommendations(tasks: &[TaskCandidate], raw: &str, now: DateTime<Utc>) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let large = tasks.iter().filter(|t| t.is_large()).count();
    if large > 0 {
        out.push(Recommendation::new(
            RecommendationType::Task,
            format!(
                "Break down {} large task{} into steps under two hours each",
                large,
                if large == 1 { "" } else { "s" }
            ),
            Priority::High,
            85,
            now,
        ));
    }

    let skills = suggested_skills(raw);
    if !skills.is_empty() {
        out.push(Recommendation::new(
            RecommendationType::Learning,
            format!(
                "Strengthen skills this work calls for: {}",
                skills.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            Priority::Medium,
            70,
            now,
        ));
    }

    let high = tasks.iter().filter(|t| t.priority == Priority::High).count();
    if high > HIGH_PRIORITY_LIMIT {
        out.push(Recommendation::new(
            RecommendationType::Efficiency,
            format!(
                "{} tasks are high priority; rank them and defer or delegate the rest",
                high
            ),
            Priority::High,
            80,
            now,
        ));
    }

    if tasks.len() > TASK_COUNT_LIMIT {
        out.push(Recommendation::new(
            RecommendationType::Time,
            format!(
                "{} tasks extracted; block dedicated focus time to work through them",
                tasks.len()
            ),
            Priority::Medium,
            75,
            now,
        ));
    }

    let lower = raw.to_lowercase();
    if lexicon::TEAM_TERMS.iter().any(|t| lower.contains(t)) {
        out.push(Recommendation::new(
            RecommendationType::Leadership,
            "Shared work detected; agree on owners and a check-in cadence",
            Priority::Medium,
            65,
            now,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Complexity;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
    }

    fn kinds(recs: &[Recommendation]) -> Vec<RecommendationType> {
        recs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn no_signals_no_recommendations() {
        assert!(recommendations(&[], "hello", now()).is_empty());
    }

    #[test]
    fn large_tasks_are_counted() {
        let tasks = vec![
            TaskCandidate::new(0, "a").with_complexity(Complexity::High),
            TaskCandidate::new(1, "b").with_complexity(Complexity::High),
            TaskCandidate::new(2, "c").with_complexity(Complexity::Medium),
        ];
        let recs = recommendations(&tasks, "", now());
        assert_eq!(kinds(&recs), [RecommendationType::Task]);
        assert!(recs[0].content.contains("2 large tasks"));
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].impact, 85);
    }

    #[test]
    fn efficiency_needs_more_than_three_high() {
        let high = |i| TaskCandidate::new(i, "x").with_priority(Priority::High);

        let three: Vec<_> = (0..3).map(high).collect();
        assert!(!kinds(&recommendations(&three, "", now())).contains(&RecommendationType::Efficiency));

        let four: Vec<_> = (0..4).map(high).collect();
        let recs = recommendations(&four, "", now());
        let eff = recs
            .iter()
            .find(|r| r.kind == RecommendationType::Efficiency)
            .unwrap();
        assert_eq!(eff.priority, Priority::High);
        assert_eq!(eff.impact, 80);
    }

    #[test]
    fn time_needs_more_than_five_tasks() {
        let five: Vec<_> = (0..5).map(|i| TaskCandidate::new(i, "x")).collect();
        assert!(recommendations(&five, "", now()).is_empty());

        let six: Vec<_> = (0..6).map(|i| TaskCandidate::new(i, "x")).collect();
        let recs = recommendations(&six, "", now());
        assert_eq!(kinds(&recs), [RecommendationType::Time]);
        assert_eq!(recs[0].impact, 75);
    }

    #[test]
    fn learning_and_leadership_come_from_text() {
        let recs = recommendations(&[], "The team will build the API and the React UI", now());
        assert_eq!(
            kinds(&recs),
            [RecommendationType::Learning, RecommendationType::Leadership]
        );
        assert!(recs[0].content.contains("backend, frontend"));
        assert_eq!(recs[1].impact, 65);
    }

    #[test]
    fn recommendations_share_timestamp() {
        let recs = recommendations(&[], "assign the api work", now());
        assert!(recs.iter().all(|r| r.timestamp == now()));
    }

    #[test]
    fn insights_one_per_signal() {
        let found = insights("Goal: meet the deadline. Goals and objectives are set.");
        assert_eq!(found.len(), 2);
        assert!(found[0].contains("objectives"));
        assert!(found[1].contains("Time-sensitive"));
    }

    #[test]
    fn default_insight() {
        assert_eq!(insights("nothing here"), [lexicon::DEFAULT_INSIGHT]);
    }

    #[test]
    fn skills_include_hashtags_and_domains() {
        let skills = suggested_skills("#ops fix the css");
        assert_eq!(
            skills.into_iter().collect::<Vec<_>>(),
            ["bug", "frontend", "ops"]
        );
    }

    #[test]
    fn hashtag_alone_triggers_learning() {
        let tasks = vec![TaskCandidate::new(0, "Plan the #ops rollout")];
        let recs = recommendations(&tasks, "- Plan the #ops rollout\n", now());
        assert_eq!(kinds(&recs), [RecommendationType::Learning]);
        assert!(recs[0].content.ends_with(": ops"));
        assert_eq!(recs[0].impact, 70);
    }
}
