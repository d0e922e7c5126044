//! Output formatting for CLI commands

use serde::Serialize;

use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = match self.format {
            OutputFormat::Text => serde_json::to_string_pretty(data),
            OutputFormat::Json => serde_json::to_string(data),
        };

        match rendered {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to serialize output: {}", e),
        }
    }

    /// Prints a section heading (text only)
    pub fn heading(&self, title: &str) {
        if self.is_text() {
            println!("{}", title);
        }
    }

    /// Prints a table row (text only, ignored in JSON mode)
    pub fn row(&self, columns: &[&str]) {
        if self.is_text() {
            println!("  {}", columns.join("  "));
        }
    }

    /// Prints a blank line (text only)
    pub fn blank(&self) {
        if self.is_text() {
            println!();
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}
