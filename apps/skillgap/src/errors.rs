use thiserror::Error;

/// Misuse of the client itself: bad input, unknown routes, actions on the
/// wrong page or while a request is in flight. Backend failures are not
/// errors at this level; pages turn them into toasts.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Skill level must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Progress must be between 0 and 100, got {0}")]
    InvalidProgress(u8),

    #[error("Unknown career role: {0}")]
    UnknownRole(String),

    #[error("Action needs the {expected} page, current page is {actual}")]
    WrongScreen { expected: String, actual: String },

    #[error("Skill '{0}' is not required by this role")]
    UnknownSkill(String),

    #[error("Invalid rating '{0}', expected SKILL=LEVEL")]
    MalformedRating(String),

    #[error("A request is already in flight")]
    InFlight,

    #[error("Nothing loaded yet")]
    NotReady,
}
