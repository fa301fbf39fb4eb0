use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::Priority;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapItem {
    pub skill: String,
    pub priority: Priority,
    pub estimated_time: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub milestones: Vec<String>,
}

/// Learning plan derived by the backend from one gap analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roadmap {
    pub id: String,
    #[serde(default)]
    pub career_role_id: Option<String>,
    pub total_duration: String,
    pub roadmap_items: Vec<RoadmapItem>,
    pub ai_recommendations: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Picks the roadmap with the given id out of a full listing.
/// The backend has no single-roadmap endpoint.
pub fn find_roadmap(roadmaps: Vec<Roadmap>, id: &str) -> Option<Roadmap> {
    roadmaps.into_iter().find(|r| r.id == id)
}
