use super::{FetchState, PageContext};
use crate::errors::AppError;
use crate::models::progress::average_progress;
use crate::models::{Assessment, ProgressRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub assessment_count: usize,
    pub average_progress: u8,
    pub tracked_roles: usize,
}

/// Assessments and progress, fetched side by side.
#[derive(Debug, Default)]
pub struct DashboardPage {
    assessments: FetchState<Vec<Assessment>>,
    progress: FetchState<Vec<ProgressRecord>>,
}

impl DashboardPage {
    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.assessments.begin_load()?;
        self.progress.begin_load()?;

        let api = ctx.api();
        let token = ctx.token();
        let (assessments, progress) =
            tokio::join!(api.assessments(token), api.progress(token));

        match assessments {
            Ok(list) => self.assessments.settle(list),
            Err(e) => {
                self.assessments.fail();
                ctx.report(&e, "Failed to load assessments");
            }
        }
        match progress {
            Ok(list) => self.progress.settle(list),
            Err(e) => {
                self.progress.fail();
                ctx.report(&e, "Failed to load progress");
            }
        }
        Ok(())
    }

    pub fn assessments(&self) -> &[Assessment] {
        self.assessments.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn progress(&self) -> &[ProgressRecord] {
        self.progress.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Aggregates over whatever settled. `None` until both fetches have
    /// left the loading state; a failed fetch counts as an empty list.
    pub fn summary(&self) -> Option<DashboardSummary> {
        if self.assessments.is_in_flight() || self.progress.is_in_flight() {
            return None;
        }
        let progress = self.progress();
        Some(DashboardSummary {
            assessment_count: self.assessments().len(),
            average_progress: average_progress(progress),
            tracked_roles: progress.len(),
        })
    }

    /// False shows the getting-started prompt pointing at the role list.
    pub fn has_assessments(&self) -> bool {
        !self.assessments().is_empty()
    }
}
