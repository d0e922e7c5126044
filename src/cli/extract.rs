//! Extraction commands (extract, order)

use anyhow::{Context, Result};
use std::collections::BTreeSet;

use super::output::Output;
use crate::domain::{Document, TaskCandidate};
use crate::engine::{self, ExtractionResult};

/// Prints candidates, dependency edges and document signals
pub fn extract(output: &Output, doc: &Document) -> Result<()> {
    let result = engine::extract_document(doc);

    if output.is_json() {
        output.data(&result);
        return Ok(());
    }

    print_summary(output, &result);

    if result.tasks.is_empty() {
        println!("No tasks found.");
    } else {
        output.heading(&format!("Tasks ({}):", result.tasks.len()));
        for task in &result.tasks {
            print_task(output, task);
        }
    }

    let edges = result.dependencies.edges();
    if !edges.is_empty() {
        output.blank();
        output.heading(&format!("Dependencies ({}):", edges.len()));
        for edge in edges {
            let from = &result.tasks[edge.from_index].title;
            let to = &result.tasks[edge.to_index].title;
            output.row(&[
                &format!("{} -> {}", edge.from_index, edge.to_index),
                &format!("{} depends on {}", from, to),
            ]);
        }
    }

    if !result.insights.is_empty() {
        output.blank();
        output.heading("Insights:");
        for insight in &result.insights {
            output.row(&["-", insight]);
        }
    }

    if !result.suggested_skills.is_empty() {
        output.blank();
        output.heading(&format!(
            "Skills: {}",
            result.suggested_skills.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }

    output.blank();
    output.heading(&format!("Estimated effort: {} min", result.estimated_effort_minutes));

    Ok(())
}

/// Prints candidates with prerequisites first
///
/// The extracted graph is not modified; a cyclic graph is reported as an error.
pub fn order(output: &Output, doc: &Document) -> Result<()> {
    let result = engine::extract_document(doc);

    let order = result
        .dependencies
        .topological_order()
        .context("Cannot order tasks")?;

    let ordered: Vec<&TaskCandidate> = order.iter().filter_map(|&i| result.tasks.get(i)).collect();

    if output.is_json() {
        output.data(&ordered);
    } else if ordered.is_empty() {
        println!("No tasks found.");
    } else {
        output.heading(&format!("Task order ({}):", ordered.len()));
        for (position, task) in ordered.iter().enumerate() {
            let after = index_list("after", &result.dependencies.dependencies(task.index));
            let unblocks = index_list("unblocks", &result.dependencies.dependents(task.index));
            output.row(&[
                &format!("{}.", position + 1),
                &format!("[{}]", task.index),
                &task.title,
                &after,
                &unblocks,
            ]);
        }
    }

    Ok(())
}

/// Formats `(label 1, 2)`, or nothing for an empty set
fn index_list(label: &str, indices: &BTreeSet<usize>) -> String {
    if indices.is_empty() {
        return String::new();
    }
    format!(
        "({} {})",
        label,
        indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
    )
}

fn print_summary(output: &Output, result: &ExtractionResult) {
    output.heading(&result.title);
    if !result.description.is_empty() {
        output.heading(&result.description);
    }
    output.blank();
}

fn print_task(output: &Output, task: &TaskCandidate) {
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        task.tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ")
    };

    output.row(&[
        &format!("[{}]", task.index),
        &format!("{:<6}", task.priority.as_str()),
        &format!("{:>4} min", task.estimated_duration_minutes),
        &task.title,
        &tags,
    ]);
}
