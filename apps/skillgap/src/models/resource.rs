use serde::{Deserialize, Serialize};

/// Catalogue entry for a curated learning resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Course, Tutorial, Video or Article.
    #[serde(rename = "type")]
    pub kind: String,
    /// Beginner, Intermediate or Advanced.
    pub difficulty: String,
    pub duration: String,
    pub skills: Vec<String>,
    pub url: String,
}
