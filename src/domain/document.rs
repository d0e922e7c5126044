//! Document input model
//!
//! A document is raw content plus the content category its source declared.
//! Declared types arrive as free text (usually a MIME type); they are mapped
//! once onto the closed [`ContentCategory`] set and everything downstream
//! matches on that enum.

use serde::{Deserialize, Serialize};

/// Content category a document was declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Markdown,
    PlainText,
    Pdf,
    Word,
    Csv,
    Json,
    #[default]
    Unsupported,
}

impl ContentCategory {
    /// Maps a declared type (MIME type, extension, or short name) to a category
    ///
    /// Unknown values map to `Unsupported`, never to an error.
    pub fn from_declared(declared: &str) -> Self {
        let d = declared.trim().trim_start_matches('.').to_lowercase();

        match d.as_str() {
            "md" | "markdown" | "mdown" | "mkd" => return ContentCategory::Markdown,
            "txt" | "text" | "plain" => return ContentCategory::PlainText,
            "json" => return ContentCategory::Json,
            "pdf" => return ContentCategory::Pdf,
            "doc" | "docx" | "word" => return ContentCategory::Word,
            "csv" => return ContentCategory::Csv,
            _ => {}
        }

        if d.contains("markdown") {
            ContentCategory::Markdown
        } else if d.contains("json") {
            ContentCategory::Json
        } else if d.contains("pdf") {
            ContentCategory::Pdf
        } else if d.contains("msword") || d.contains("wordprocessingml") {
            ContentCategory::Word
        } else if d.contains("csv") {
            ContentCategory::Csv
        } else if d.starts_with("text/plain") {
            ContentCategory::PlainText
        } else {
            ContentCategory::Unsupported
        }
    }

    /// Returns a display label for placeholder results
    pub fn label(&self) -> &'static str {
        match self {
            ContentCategory::Markdown => "Markdown",
            ContentCategory::PlainText => "Plain text",
            ContentCategory::Pdf => "PDF",
            ContentCategory::Word => "Word",
            ContentCategory::Csv => "CSV",
            ContentCategory::Json => "JSON",
            ContentCategory::Unsupported => "Unsupported",
        }
    }

    /// Returns all categories
    pub fn all() -> &'static [ContentCategory] {
        &[
            ContentCategory::Markdown,
            ContentCategory::PlainText,
            ContentCategory::Pdf,
            ContentCategory::Word,
            ContentCategory::Csv,
            ContentCategory::Json,
            ContentCategory::Unsupported,
        ]
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentCategory::Markdown => write!(f, "markdown"),
            ContentCategory::PlainText => write!(f, "plain_text"),
            ContentCategory::Pdf => write!(f, "pdf"),
            ContentCategory::Word => write!(f, "word"),
            ContentCategory::Csv => write!(f, "csv"),
            ContentCategory::Json => write!(f, "json"),
            ContentCategory::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl From<&str> for ContentCategory {
    fn from(declared: &str) -> Self {
        ContentCategory::from_declared(declared)
    }
}

/// Raw document content with its declared category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub raw_content: String,
    pub declared_type: ContentCategory,
}

impl Document {
    pub fn new(raw_content: impl Into<String>, declared_type: ContentCategory) -> Self {
        Self {
            raw_content: raw_content.into(),
            declared_type,
        }
    }

    /// Creates a document from a free-text declared type
    pub fn from_declared(raw_content: impl Into<String>, declared: &str) -> Self {
        Self::new(raw_content, ContentCategory::from_declared(declared))
    }
}
