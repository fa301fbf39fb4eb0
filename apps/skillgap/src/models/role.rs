use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredSkill {
    pub name: String,
    pub category: String,
    /// Target proficiency the backend scores against: Beginner, Intermediate or Advanced.
    #[serde(default = "default_target_level")]
    pub level: String,
}

fn default_target_level() -> String {
    "Beginner".to_string()
}

/// A target job role. Read-only from the client's side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerRole {
    pub id: String,
    pub title: String,
    pub description: String,
    pub average_salary: String,
    pub growth_rate: String,
    pub required_skills: Vec<RequiredSkill>,
}

impl CareerRole {
    /// Distinct skill categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for skill in &self.required_skills {
            if !seen.contains(&skill.category.as_str()) {
                seen.push(&skill.category);
            }
        }
        seen
    }
}
