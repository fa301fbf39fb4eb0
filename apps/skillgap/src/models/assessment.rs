use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Self-rated proficiency, 1 (Beginner) to 5 (Expert) inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: SkillLevel = SkillLevel(1);
    pub const MAX: SkillLevel = SkillLevel(5);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Basic",
            3 => "Intermediate",
            4 => "Advanced",
            _ => "Expert",
        }
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(SkillLevel(value))
        } else {
            Err(AppError::InvalidRating(value))
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// A rating the user is about to submit; the level is always in range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillRating {
    pub skill_name: String,
    pub current_level: SkillLevel,
}

/// A rating as the backend stored it. The level is taken as-is so one odd
/// record cannot fail a whole `GET /assessments` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordedRating {
    pub skill_name: String,
    pub current_level: u8,
}

impl From<SkillRating> for RecordedRating {
    fn from(rating: SkillRating) -> Self {
        Self {
            skill_name: rating.skill_name,
            current_level: rating.current_level.value(),
        }
    }
}

/// Body of `POST /assessments`: one rating per required skill of the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssessment {
    pub career_role_id: String,
    pub skills: Vec<SkillRating>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    pub id: String,
    pub career_role_id: String,
    pub skills: Vec<RecordedRating>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
