//! Reading documents from files or stdin

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{ContentCategory, Document};
use crate::storage::ProjectConfig;

/// Path argument that means "read stdin"
pub const STDIN_PATH: &str = "-";

/// Reads a document and works out its declared type
///
/// `--type` wins; otherwise the file extension is looked up through the
/// project config, which falls back to its `default_type`.
pub fn read_document(path: &str, type_override: Option<&str>, config: &ProjectConfig) -> Result<Document> {
    let bytes = if path == STDIN_PATH {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read document from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Failed to read document: {}", path))?
    };

    let declared = match type_override {
        Some(t) => t.to_string(),
        None if path == STDIN_PATH => config.default_type.clone(),
        None => config.declared_type_for(Path::new(path).extension().and_then(|e| e.to_str())),
    };

    let category = ContentCategory::from_declared(&declared);
    tracing::debug!("Declared type {:?} -> {}", declared, category);

    Ok(Document::new(String::from_utf8_lossy(&bytes).into_owned(), category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn type_from_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "{}").unwrap();

        let doc = read_document(path.to_str().unwrap(), None, &ProjectConfig::default()).unwrap();
        assert_eq!(doc.declared_type, ContentCategory::Json);
        assert_eq!(doc.raw_content, "{}");
    }

    #[test]
    fn override_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, "- a").unwrap();

        let doc = read_document(path.to_str().unwrap(), Some("text/markdown"), &ProjectConfig::default()).unwrap();
        assert_eq!(doc.declared_type, ContentCategory::Markdown);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"- caf\xff\n").unwrap();

        let doc = read_document(path.to_str().unwrap(), None, &ProjectConfig::default()).unwrap();
        assert_eq!(doc.declared_type, ContentCategory::PlainText);
        assert!(doc.raw_content.contains('\u{fffd}'));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_document("/nonexistent/plan.md", None, &ProjectConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read document"));
    }
}
