//! Auth Gate: a pure function of (route, session).
//!
//! Re-evaluated on every navigation. No side effects; the app loop performs
//! the redirect the decision asks for.

use super::{Access, Route};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

pub fn check(route: &Route, session: &Session) -> GuardDecision {
    match (route.access(), session.is_authenticated()) {
        (Access::Protected, false) => GuardDecision::Redirect(Route::Login),
        (Access::PublicOnly, true) => GuardDecision::Redirect(Route::home()),
        _ => GuardDecision::Render,
    }
}
