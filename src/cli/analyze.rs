//! Analysis commands (analyze, classify)

use anyhow::Result;
use serde::Serialize;

use super::output::Output;
use crate::domain::Document;
use crate::engine::{self, classify};

/// Prints recommendations synthesized from a document
pub fn analyze(output: &Output, doc: &Document) -> Result<()> {
    let analysis = engine::analyze(&doc.raw_content, doc.declared_type);

    if output.is_json() {
        output.data(&analysis);
        return Ok(());
    }

    if analysis.recommendations.is_empty() {
        println!("No recommendations.");
    } else {
        output.heading(&format!("Recommendations ({}):", analysis.recommendations.len()));
        for rec in &analysis.recommendations {
            output.row(&[
                &rec.id.to_string(),
                &format!("{:<10}", rec.kind.as_str()),
                &format!("{:<6}", rec.priority.as_str()),
                &format!("{:>3}", rec.impact),
                &rec.content,
            ]);
        }
    }

    output.blank();
    output.heading("Insights:");
    for insight in &analysis.insights {
        output.row(&["-", insight]);
    }

    output.blank();
    output.heading(&format!(
        "{} tasks, estimated effort {} min",
        analysis.tasks.len(),
        analysis.estimated_effort_minutes
    ));

    Ok(())
}

#[derive(Serialize)]
struct ClassifyReport<'a> {
    text: &'a str,
    #[serde(flatten)]
    classification: classify::Classification,
}

/// Prints the four classifier outputs for one span
pub fn classify(output: &Output, text: &str) -> Result<()> {
    let classification = classify::classify(text);

    if output.is_json() {
        output.data(&ClassifyReport { text, classification });
        return Ok(());
    }

    let tags = if classification.tags.is_empty() {
        "(none)".to_string()
    } else {
        classification.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    println!(
        "Complexity: {} ({:?})",
        classification.complexity, classification.complexity_cue
    );
    println!("Duration:   {} min", classification.estimated_duration_minutes);
    println!(
        "Priority:   {} ({:?})",
        classification.priority, classification.priority_cue
    );
    println!("Tags:       {}", tags);

    Ok(())
}
