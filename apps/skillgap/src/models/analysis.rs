use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse urgency bucket the backend attaches to a gap or roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGap {
    pub skill: String,
    #[serde(default)]
    pub category: Option<String>,
    pub current_level: u8,
    pub required_level: u8,
    pub gap: i32,
    pub priority: Priority,
}

impl SkillGap {
    /// True when the reported gap equals `required_level - current_level`.
    pub fn is_consistent(&self) -> bool {
        self.gap == i32::from(self.required_level) - i32::from(self.current_level)
    }
}

/// One axis of the current-vs-required radar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarPoint {
    pub skill: String,
    pub current: u8,
    pub required: u8,
}

const RADAR_LABEL_MAX: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GapAnalysis {
    pub id: String,
    #[serde(default)]
    pub career_role_id: Option<String>,
    /// 0 – 100
    pub readiness_score: f64,
    pub skill_gaps: Vec<SkillGap>,
    pub ai_insights: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl GapAnalysis {
    pub fn verdict(&self) -> &'static str {
        match self.readiness_score {
            s if s >= 80.0 => "Excellent! You're almost ready.",
            s if s >= 60.0 => "Good progress! Keep learning.",
            _ => "Great start! Focus on key skills.",
        }
    }

    pub fn radar_points(&self) -> Vec<RadarPoint> {
        self.skill_gaps
            .iter()
            .map(|gap| RadarPoint {
                skill: truncate_label(&gap.skill),
                current: gap.current_level,
                required: gap.required_level,
            })
            .collect()
    }

    pub fn gaps_with_priority(&self, priority: Priority) -> impl Iterator<Item = &SkillGap> {
        self.skill_gaps.iter().filter(move |g| g.priority == priority)
    }
}

fn truncate_label(skill: &str) -> String {
    if skill.chars().count() > RADAR_LABEL_MAX {
        let head: String = skill.chars().take(RADAR_LABEL_MAX).collect();
        format!("{head}...")
    } else {
        skill.to_string()
    }
}
