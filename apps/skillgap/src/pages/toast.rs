//! Transient user notifications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        };
        write!(f, "{marker} {}", self.message)
    }
}

/// Queue of toasts raised since the last drain.
#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        self.toasts.push(Toast { level, message });
    }

    #[cfg(test)]
    pub fn pending(&self) -> &[Toast] {
        &self.toasts
    }

    #[cfg(test)]
    pub fn error_count(&self) -> usize {
        self.toasts
            .iter()
            .filter(|t| t.level == ToastLevel::Error)
            .count()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
