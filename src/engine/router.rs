//! Content routing
//!
//! Dispatches a document on its content category. Markdown and plain text
//! are normalized for the classifiers, JSON maps straight onto candidates,
//! and every other category gets a placeholder.

use serde_json::{Map, Value};
use thiserror::Error;

use super::normalize::NormalizedBody;
use crate::domain::{ContentCategory, Document, Priority, TaskCandidate};

pub const UNTITLED_DOCUMENT: &str = "Untitled Document";
pub const UNTITLED_TASK: &str = "Untitled Task";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// A document after routing
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// Rendered text for the classifiers and dependency inference
    Body(NormalizedBody),

    /// Candidates given directly by a structured source
    Structured {
        title: String,
        description: String,
        tasks: Vec<TaskCandidate>,
    },

    /// A category with no parser
    Placeholder(ContentCategory),
}

/// Routes a document to its parser
pub fn route(doc: &Document) -> Result<Routed, ExtractError> {
    tracing::debug!("Routing {} document ({} bytes)", doc.declared_type, doc.raw_content.len());

    match doc.declared_type {
        ContentCategory::Markdown | ContentCategory::PlainText => {
            Ok(Routed::Body(NormalizedBody::from_markdown(&doc.raw_content)))
        }
        ContentCategory::Json => parse_json(&doc.raw_content),
        ContentCategory::Pdf
        | ContentCategory::Word
        | ContentCategory::Csv
        | ContentCategory::Unsupported => Ok(Routed::Placeholder(doc.declared_type)),
    }
}

/// Placeholder title for a category without a parser
pub fn placeholder_title(category: ContentCategory) -> String {
    format!("{} Document", category.label())
}

/// Placeholder description for a category without a parser
pub fn placeholder_description(category: ContentCategory) -> String {
    format!(
        "{} content received; detailed parsing is not supported for this format.",
        category.label()
    )
}

fn parse_json(raw: &str) -> Result<Routed, ExtractError> {
    let value: Value = serde_json::from_str(raw)?;
    let obj = match value {
        Value::Object(obj) => obj,
        other => return Err(ExtractError::NotAnObject(json_kind(&other))),
    };

    let title = string_field(&obj, "title").unwrap_or(UNTITLED_DOCUMENT).to_string();
    let description = string_field(&obj, "description").unwrap_or_default().to_string();

    let entries: &[Value] = match obj.get("tasks") {
        Some(Value::Array(entries)) => entries.as_slice(),
        _ => &[],
    };

    let tasks = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(task) => Some(task),
            other => {
                tracing::debug!("Skipping non-object task entry ({})", json_kind(other));
                None
            }
        })
        .enumerate()
        .map(|(index, task)| json_task(index, task))
        .collect();

    Ok(Routed::Structured {
        title,
        description,
        tasks,
    })
}

fn json_task(index: usize, task: &Map<String, Value>) -> TaskCandidate {
    let mut candidate = TaskCandidate::new(index, string_field(task, "title").unwrap_or(UNTITLED_TASK))
        .with_description(string_field(task, "description").unwrap_or_default());

    if let Some(minutes) = task.get("duration").and_then(duration_minutes) {
        candidate = candidate.with_duration(minutes);
    }

    if let Some(priority) = string_field(task, "priority") {
        candidate = candidate.with_priority(priority.parse::<Priority>().unwrap_or_default());
    }

    if let Some(Value::Array(tags)) = task.get("tags") {
        candidate = candidate.with_tags(tags.iter().filter_map(Value::as_str));
    }

    candidate
}

fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn duration_minutes(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f.round() as u32)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(raw: &str) -> (String, String, Vec<TaskCandidate>) {
        match route(&Document::new(raw, ContentCategory::Json)).unwrap() {
            Routed::Structured {
                title,
                description,
                tasks,
            } => (title, description, tasks),
            other => panic!("expected structured result, got {:?}", other),
        }
    }

    #[test]
    fn json_tasks_map_directly() {
        let (title, description, tasks) = structured(
            r#"{"title":"X","description":"D","tasks":[
                {"title":"T1","duration":30,"priority":"high","tags":["ops"]},
                {"description":"no title"}
            ]}"#,
        );

        assert_eq!(title, "X");
        assert_eq!(description, "D");
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0].title, "T1");
        assert_eq!(tasks[0].estimated_duration_minutes, 30);
        assert_eq!(tasks[0].priority, Priority::High);
        assert!(tasks[0].tags.contains("ops"));
        assert_eq!(tasks[0].complexity, None);

        assert_eq!(tasks[1].index, 1);
        assert_eq!(tasks[1].title, UNTITLED_TASK);
        assert_eq!(tasks[1].description, "no title");
        assert_eq!(tasks[1].estimated_duration_minutes, 60);
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert!(tasks[1].tags.is_empty());
    }

    #[test]
    fn json_bypasses_classifiers() {
        let (_, _, tasks) = structured(r#"{"tasks":[{"title":"URGENT: fix this complex bug"}]}"#);
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].estimated_duration_minutes, 60);
        assert!(tasks[0].tags.is_empty());
    }

    #[test]
    fn json_defaults() {
        let (title, description, tasks) = structured("{}");
        assert_eq!(title, UNTITLED_DOCUMENT);
        assert_eq!(description, "");
        assert!(tasks.is_empty());
    }

    #[test]
    fn json_unknown_priority_is_medium() {
        let (_, _, tasks) = structured(r#"{"tasks":[{"title":"a","priority":"whenever"}]}"#);
        assert_eq!(tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn json_skips_non_object_entries() {
        let (_, _, tasks) = structured(r#"{"tasks":["bare", {"title":"real"}, 3]}"#);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].index, 0);
        assert_eq!(tasks[0].title, "real");
    }

    #[test]
    fn json_errors() {
        let err = route(&Document::new("{not json", ContentCategory::Json)).unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));

        let err = route(&Document::new("[1, 2]", ContentCategory::Json)).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn unparsed_categories_get_placeholders() {
        for category in [
            ContentCategory::Pdf,
            ContentCategory::Word,
            ContentCategory::Csv,
            ContentCategory::Unsupported,
        ] {
            let routed = route(&Document::new("%PDF-1.7 ...", category)).unwrap();
            assert_eq!(routed, Routed::Placeholder(category));
            assert!(!placeholder_title(category).is_empty());
            assert!(!placeholder_description(category).is_empty());
        }
    }

    #[test]
    fn markdown_and_plain_text_are_normalized() {
        for category in [ContentCategory::Markdown, ContentCategory::PlainText] {
            let routed = route(&Document::new("- one\n- two\n", category)).unwrap();
            match routed {
                Routed::Body(body) => assert_eq!(body.list_items().count(), 2),
                other => panic!("expected body, got {:?}", other),
            }
        }
    }
}
