//! Page orchestrators.
//!
//! Each page owns the `FetchState` of its independent fetches, fetches on
//! mount, and reports every failure as exactly one error toast. Pages only
//! read the session; changes to it travel back to the app as an `Effect`.

use tracing::warn;

use crate::api_client::{ApiClient, ApiError};
use crate::models::AuthResponse;
use crate::routes::Route;
use crate::session::Session;

pub mod assessment;
pub mod dashboard;
pub mod fetch;
pub mod gap_analysis;
pub mod layout;
pub mod login;
pub mod progress;
pub mod register;
pub mod resources;
pub mod roadmap;
pub mod roles;
pub mod toast;

pub use fetch::FetchState;
pub use toast::{Toast, Toaster};

const CONNECTION_ERROR: &str = "Connection error. Please try again.";

/// What a page asks the app to do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(Route),
    /// Store the backend-issued identity, then navigate.
    SignIn { auth: AuthResponse, redirect: Route },
    SignOut,
    /// A bearer call came back 401 while logged in.
    SessionExpired,
}

/// Everything a page may touch while mounting or handling an action.
pub struct PageContext<'a> {
    api: &'a ApiClient,
    session: &'a Session,
    toasts: &'a mut Toaster,
    session_expired: bool,
}

impl<'a> PageContext<'a> {
    pub fn new(api: &'a ApiClient, session: &'a Session, toasts: &'a mut Toaster) -> Self {
        Self {
            api,
            session,
            toasts,
            session_expired: false,
        }
    }

    pub fn api(&self) -> &'a ApiClient {
        self.api
    }

    pub fn token(&self) -> Option<&'a str> {
        self.session.token()
    }

    pub fn toasts(&mut self) -> &mut Toaster {
        self.toasts
    }

    /// Raises one error toast for a failed call.
    ///
    /// Transport failures get a fixed connection message; rejections show
    /// the backend detail when present, `fallback` otherwise.
    pub fn report(&mut self, err: &ApiError, fallback: &str) {
        warn!("{fallback}: {err}");
        if err.is_unauthorized() && self.session.is_authenticated() {
            self.session_expired = true;
        }
        self.toasts.error(failure_message(err, fallback));
    }

    /// Overrides the page's own effect when its token was rejected.
    pub fn finish(self, effect: Option<Effect>) -> Option<Effect> {
        if self.session_expired {
            Some(Effect::SessionExpired)
        } else {
            effect
        }
    }
}

pub fn failure_message(err: &ApiError, fallback: &str) -> String {
    if err.is_connection() {
        CONNECTION_ERROR.to_string()
    } else {
        err.detail().unwrap_or(fallback).to_string()
    }
}
