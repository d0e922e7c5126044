//! Content-derived IDs for recommendations
//!
//! ID Format: `r-{7-char-hash}` (e.g., `r-7f2b4c1`)
//!
//! The hash is derived from the recommendation type and content, so the same
//! extraction always yields the same IDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid recommendation ID format: expected 'r-{{7-char-hash}}', got '{0}'")]
    InvalidRecommendationId(String),
}

/// Generates a 7-character hash from a kind label and content
fn generate_hash(kind: &str, content: &str) -> String {
    let input = format!("{}\u{1f}{}", kind, content);
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Recommendation ID in the format `r-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecommendationId {
    hash: String,
}

impl RecommendationId {
    /// Creates an ID from the recommendation type label and its content
    pub fn new(kind: &str, content: &str) -> Self {
        Self {
            hash: generate_hash(kind, content),
        }
    }
}

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r-{}", self.hash)
    }
}

impl FromStr for RecommendationId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hash = s
            .strip_prefix("r-")
            .ok_or_else(|| IdError::InvalidRecommendationId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidRecommendationId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for RecommendationId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecommendationId> for String {
    fn from(id: RecommendationId) -> Self {
        id.to_string()
    }
}
