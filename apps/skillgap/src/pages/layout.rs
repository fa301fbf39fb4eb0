//! Shared chrome around protected pages: navigation and logout.

use super::Effect;
use crate::routes::Route;

pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

pub fn nav_items() -> [NavItem; 4] {
    [
        NavItem {
            label: "Dashboard",
            route: Route::Dashboard,
        },
        NavItem {
            label: "Career Roles",
            route: Route::Roles,
        },
        NavItem {
            label: "Resources",
            route: Route::Resources,
        },
        NavItem {
            label: "Progress",
            route: Route::Progress,
        },
    ]
}

/// The logout button: clear the session, then show the login page.
pub fn logout() -> Effect {
    Effect::SignOut
}
