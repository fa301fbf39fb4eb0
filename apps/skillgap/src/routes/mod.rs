//! Client-side route table.
//!
//! Every route declares its access rule here; the guard in `guard.rs`
//! consults nothing but that rule and the current session.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

pub mod guard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only reachable while logged out: landing, login, registration.
    PublicOnly,
    /// Only reachable while logged in.
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Roles,
    Assessment { role_id: String },
    GapAnalysis { assessment_id: String },
    Roadmap { roadmap_id: String },
    Resources,
    Progress,
}

impl Route {
    pub fn access(&self) -> Access {
        match self {
            Route::Landing | Route::Login | Route::Register => Access::PublicOnly,
            _ => Access::Protected,
        }
    }

    /// Where authenticated users land.
    pub fn home() -> Route {
        Route::Dashboard
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Landing => f.write_str("/"),
            Route::Login => f.write_str("/login"),
            Route::Register => f.write_str("/register"),
            Route::Dashboard => f.write_str("/dashboard"),
            Route::Roles => f.write_str("/roles"),
            Route::Assessment { role_id } => write!(f, "/assessment/{role_id}"),
            Route::GapAnalysis { assessment_id } => write!(f, "/gap-analysis/{assessment_id}"),
            Route::Roadmap { roadmap_id } => write!(f, "/roadmap/{roadmap_id}"),
            Route::Resources => f.write_str("/resources"),
            Route::Progress => f.write_str("/progress"),
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Landing,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["roles"] => Route::Roles,
            ["assessment", id] => Route::Assessment {
                role_id: id.to_string(),
            },
            ["gap-analysis", id] => Route::GapAnalysis {
                assessment_id: id.to_string(),
            },
            ["roadmap", id] => Route::Roadmap {
                roadmap_id: id.to_string(),
            },
            ["resources"] => Route::Resources,
            ["progress"] => Route::Progress,
            _ => return Err(AppError::UnknownRoute(trimmed.to_string())),
        };
        Ok(route)
    }
}
