use std::collections::HashMap;

use super::{FetchState, PageContext};
use crate::errors::AppError;
use crate::models::{CareerRole, ProgressRecord, ProgressUpdate};

const UNKNOWN_ROLE_TITLE: &str = "Career Role";

/// Progress records next to the role catalogue used to title them.
#[derive(Debug, Default)]
pub struct ProgressPage {
    records: FetchState<Vec<ProgressRecord>>,
    roles: FetchState<HashMap<String, CareerRole>>,
}

impl ProgressPage {
    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.records.begin_load()?;
        self.roles.begin_load()?;

        let api = ctx.api();
        let token = ctx.token();
        let (records, roles) = tokio::join!(api.progress(token), api.roles());

        match records {
            Ok(list) => self.records.settle(list),
            Err(e) => {
                self.records.fail();
                ctx.report(&e, "Failed to load progress data");
            }
        }
        match roles {
            Ok(list) => self
                .roles
                .settle(list.into_iter().map(|r| (r.id.clone(), r)).collect()),
            Err(e) => {
                self.roles.fail();
                ctx.report(&e, "Failed to load progress data");
            }
        }
        Ok(())
    }

    pub fn records(&self) -> &[ProgressRecord] {
        self.records.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn role_title(&self, role_id: &str) -> &str {
        self.roles
            .data()
            .and_then(|roles| roles.get(role_id))
            .map_or(UNKNOWN_ROLE_TITLE, |role| role.title.as_str())
    }

    /// Posts one skill's progress and replaces the role's record with the
    /// backend's recomputed one.
    pub async fn record(
        &mut self,
        ctx: &mut PageContext<'_>,
        role_id: &str,
        update: ProgressUpdate,
    ) -> Result<(), AppError> {
        if update.progress > 100 {
            return Err(AppError::InvalidProgress(update.progress));
        }
        if self.records.is_in_flight() {
            return Err(AppError::InFlight);
        }
        match ctx.api().record_progress(ctx.token(), role_id, &update).await {
            Ok(record) => {
                if let Some(records) = self.records.data_mut() {
                    match records
                        .iter_mut()
                        .find(|r| r.career_role_id == record.career_role_id)
                    {
                        Some(existing) => *existing = record,
                        None => records.push(record),
                    }
                } else {
                    self.records = FetchState::Ready(vec![record]);
                }
                ctx.toasts().success("Progress updated");
            }
            Err(e) => ctx.report(&e, "Failed to update progress"),
        }
        Ok(())
    }
}
