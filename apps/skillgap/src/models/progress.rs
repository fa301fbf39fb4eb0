use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillProgress {
    pub skill: String,
    /// 0 – 100
    pub progress: u8,
    #[serde(default)]
    pub notes: String,
}

impl SkillProgress {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}

/// Learning progress aggregated per career role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressRecord {
    pub id: String,
    pub career_role_id: String,
    /// 0 – 100
    pub overall_progress: u8,
    pub skill_progress: Vec<SkillProgress>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /progress?career_role_id=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub skill: String,
    pub progress: u8,
    #[serde(default)]
    pub notes: String,
}

/// Rounded mean of `overall_progress`, 0 for an empty list.
pub fn average_progress(records: &[ProgressRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let sum: f64 = records.iter().map(|r| f64::from(r.overall_progress)).sum();
    (sum / records.len() as f64).round().clamp(0.0, 100.0) as u8
}
