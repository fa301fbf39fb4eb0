use super::{Effect, FetchState, PageContext};
use crate::errors::AppError;
use crate::models::Registration;
use crate::routes::Route;

/// Client-side hint only; the backend has the final say.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account creation form. Public-only.
#[derive(Debug)]
pub struct RegisterPage {
    form: FetchState<()>,
}

impl Default for RegisterPage {
    fn default() -> Self {
        Self {
            form: FetchState::Ready(()),
        }
    }
}

impl RegisterPage {
    pub fn is_submitting(&self) -> bool {
        self.form.is_in_flight()
    }

    /// POST /auth/register. New users continue to the role catalogue.
    pub async fn submit(
        &mut self,
        ctx: &mut PageContext<'_>,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<Effect>, AppError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            ctx.toasts().error(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
            return Ok(None);
        }

        self.form.begin_submit()?;
        let registration = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match ctx.api().register(&registration).await {
            Ok(auth) => {
                self.form.finish_submit();
                ctx.toasts().success("Account created successfully!");
                Ok(Some(Effect::SignIn {
                    auth,
                    redirect: Route::Roles,
                }))
            }
            Err(e) => {
                self.form.fail();
                ctx.report(&e, "Registration failed");
                Ok(None)
            }
        }
    }
}
