use tracing::info;

use super::{Effect, FetchState, PageContext};
use crate::errors::AppError;
use crate::models::Credentials;
use crate::routes::Route;

/// Sign-in form. Public-only.
#[derive(Debug)]
pub struct LoginPage {
    form: FetchState<()>,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            form: FetchState::Ready(()),
        }
    }
}

impl LoginPage {
    pub fn is_submitting(&self) -> bool {
        self.form.is_in_flight()
    }

    /// POST /auth/login. On success the app stores the identity and moves
    /// to the dashboard.
    pub async fn submit(
        &mut self,
        ctx: &mut PageContext<'_>,
        email: &str,
        password: &str,
    ) -> Result<Option<Effect>, AppError> {
        self.form.begin_submit()?;
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = ctx.api().login(&credentials).await;
        match result {
            Ok(auth) => {
                self.form.finish_submit();
                info!("Login accepted for user {}", auth.user.id);
                ctx.toasts().success("Welcome back!");
                Ok(Some(Effect::SignIn {
                    auth,
                    redirect: Route::Dashboard,
                }))
            }
            Err(e) => {
                self.form.fail();
                ctx.report(&e, "Login failed");
                Ok(None)
            }
        }
    }
}
