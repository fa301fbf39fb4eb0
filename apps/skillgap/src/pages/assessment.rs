use tracing::info;

use super::{Effect, FetchState, PageContext};
use crate::errors::AppError;
use crate::models::{CareerRole, NewAssessment, SkillLevel, SkillRating};
use crate::routes::Route;

/// Self-assessment for one career role.
///
/// Every required skill starts at level 1. Submitting posts all ratings and
/// chains into the gap analysis for the created assessment.
#[derive(Debug)]
pub struct AssessmentPage {
    role_id: String,
    role: FetchState<CareerRole>,
    ratings: Vec<SkillRating>,
}

impl AssessmentPage {
    pub fn new(role_id: impl Into<String>) -> Self {
        Self {
            role_id: role_id.into(),
            role: FetchState::Idle,
            ratings: Vec::new(),
        }
    }

    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.role.begin_load()?;
        match ctx.api().role(&self.role_id).await {
            Ok(role) => {
                self.ratings = role
                    .required_skills
                    .iter()
                    .map(|skill| SkillRating {
                        skill_name: skill.name.clone(),
                        current_level: SkillLevel::default(),
                    })
                    .collect();
                self.role.settle(role);
            }
            Err(e) => {
                self.role.fail();
                ctx.report(&e, "Failed to load role details");
            }
        }
        Ok(())
    }

    pub fn role(&self) -> Option<&CareerRole> {
        self.role.data()
    }

    pub fn ratings(&self) -> &[SkillRating] {
        &self.ratings
    }

    pub fn is_submitting(&self) -> bool {
        self.role.is_in_flight()
    }

    pub fn rate(&mut self, skill: &str, level: u8) -> Result<(), AppError> {
        if self.role.is_in_flight() {
            return Err(AppError::InFlight);
        }
        if self.role.data().is_none() {
            return Err(AppError::NotReady);
        }
        let level = SkillLevel::try_from(level)?;
        let rating = self
            .ratings
            .iter_mut()
            .find(|r| r.skill_name == skill)
            .ok_or_else(|| AppError::UnknownSkill(skill.to_string()))?;
        rating.current_level = level;
        Ok(())
    }

    pub async fn submit(&mut self, ctx: &mut PageContext<'_>) -> Result<Option<Effect>, AppError> {
        self.role.begin_submit()?;
        let body = NewAssessment {
            career_role_id: self.role_id.clone(),
            skills: self.ratings.clone(),
        };
        match ctx.api().create_assessment(ctx.token(), &body).await {
            Ok(assessment) => {
                self.role.finish_submit();
                info!("Assessment {} created", assessment.id);
                ctx.toasts().success("Assessment submitted successfully!");
                Ok(Some(Effect::Navigate(Route::GapAnalysis {
                    assessment_id: assessment.id,
                })))
            }
            Err(e) => {
                self.role.fail();
                ctx.report(&e, "Failed to submit assessment");
                Ok(None)
            }
        }
    }
}
