use super::{Effect, FetchState, PageContext};
use crate::errors::AppError;
use crate::models::CareerRole;
use crate::routes::Route;

#[derive(Debug, Default)]
pub struct CareerRolesPage {
    roles: FetchState<Vec<CareerRole>>,
}

impl CareerRolesPage {
    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.roles.begin_load()?;
        match ctx.api().roles().await {
            Ok(roles) => self.roles.settle(roles),
            Err(e) => {
                self.roles.fail();
                ctx.report(&e, "Failed to load career roles");
            }
        }
        Ok(())
    }

    pub fn roles(&self) -> &[CareerRole] {
        self.roles.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Starts the assessment for one of the listed roles.
    pub fn select(&self, role_id: &str) -> Result<Effect, AppError> {
        let roles = self.roles.data().ok_or(AppError::NotReady)?;
        let role = roles
            .iter()
            .find(|r| r.id == role_id)
            .ok_or_else(|| AppError::UnknownRole(role_id.to_string()))?;
        Ok(Effect::Navigate(Route::Assessment {
            role_id: role.id.clone(),
        }))
    }
}
