use tracing::info;

use super::{Effect, FetchState, PageContext};
use crate::errors::AppError;
use crate::models::GapAnalysis;
use crate::routes::Route;

/// Generates a fresh analysis for the assessment on every mount.
#[derive(Debug)]
pub struct GapAnalysisPage {
    assessment_id: String,
    analysis: FetchState<GapAnalysis>,
}

impl GapAnalysisPage {
    pub fn new(assessment_id: impl Into<String>) -> Self {
        Self {
            assessment_id: assessment_id.into(),
            analysis: FetchState::Idle,
        }
    }

    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.analysis.begin_load()?;
        match ctx.api().analyze_gap(ctx.token(), &self.assessment_id).await {
            Ok(analysis) => {
                info!(
                    "Analysis {} ready, readiness {:.1}%",
                    analysis.id, analysis.readiness_score
                );
                ctx.toasts().success("Analysis complete!");
                self.analysis.settle(analysis);
            }
            Err(e) => {
                self.analysis.fail();
                ctx.report(&e, "Failed to generate analysis");
            }
        }
        Ok(())
    }

    pub fn analysis(&self) -> Option<&GapAnalysis> {
        self.analysis.data()
    }

    pub fn is_generating_roadmap(&self) -> bool {
        matches!(self.analysis, FetchState::Submitting(_))
    }

    /// Turns the loaded analysis into a roadmap and opens it.
    pub async fn generate_roadmap(
        &mut self,
        ctx: &mut PageContext<'_>,
    ) -> Result<Option<Effect>, AppError> {
        let analysis_id = self
            .analysis
            .data()
            .map(|a| a.id.clone())
            .ok_or(AppError::NotReady)?;
        self.analysis.begin_submit()?;
        match ctx.api().generate_roadmap(ctx.token(), &analysis_id).await {
            Ok(roadmap) => {
                self.analysis.finish_submit();
                ctx.toasts().success("Roadmap generated!");
                Ok(Some(Effect::Navigate(Route::Roadmap {
                    roadmap_id: roadmap.id,
                })))
            }
            Err(e) => {
                self.analysis.fail();
                ctx.report(&e, "Failed to generate roadmap");
                Ok(None)
            }
        }
    }
}
