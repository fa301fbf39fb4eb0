//! Per-fetch view state machine.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──settle──▶ Ready(T) ──begin_submit──▶ Submitting(T)
//!                         │                   ▲                          │
//!                         └──fail──▶ Failed   └──finish_submit / fail────┘
//! ```
//!
//! A second load or submit while one is in flight is refused. This is the
//! client's only duplicate-submission control.

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    /// An action is in flight; the loaded data stays visible.
    Submitting(T),
    Failed,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, FetchState::Loading | FetchState::Submitting(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed)
    }

    /// Loaded data, also while an action is in flight.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) | FetchState::Submitting(value) => Some(value),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn begin_load(&mut self) -> Result<(), AppError> {
        if self.is_in_flight() {
            return Err(AppError::InFlight);
        }
        *self = FetchState::Loading;
        Ok(())
    }

    /// Loading → Ready. Ignored in any other state.
    pub fn settle(&mut self, value: T) {
        if self.is_loading() {
            *self = FetchState::Ready(value);
        }
    }

    pub fn begin_submit(&mut self) -> Result<(), AppError> {
        match std::mem::take(self) {
            FetchState::Ready(value) => {
                *self = FetchState::Submitting(value);
                Ok(())
            }
            other => {
                let in_flight = other.is_in_flight();
                *self = other;
                if in_flight {
                    Err(AppError::InFlight)
                } else {
                    Err(AppError::NotReady)
                }
            }
        }
    }

    /// Submitting → Ready, keeping the loaded data.
    pub fn finish_submit(&mut self) {
        match std::mem::take(self) {
            FetchState::Submitting(value) => *self = FetchState::Ready(value),
            other => *self = other,
        }
    }

    /// Leaves the in-flight state after a failure: a load falls back to
    /// `Failed`, a submit returns to `Ready` with the prior data untouched.
    pub fn fail(&mut self) {
        match std::mem::take(self) {
            FetchState::Loading => *self = FetchState::Failed,
            FetchState::Submitting(value) => *self = FetchState::Ready(value),
            other => *self = other,
        }
    }
}
