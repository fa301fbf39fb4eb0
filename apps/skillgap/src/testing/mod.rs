//! Test fixtures shared across module tests.

mod mock_backend;

pub use mock_backend::{unreachable_url, MockBackend, DATA_ANALYST, FRONTEND_DEVELOPER};

use crate::api_client::ApiClient;
use crate::pages::{PageContext, Toaster};
use crate::session::Session;

/// Pieces a page needs, owned so tests can borrow them into a `PageContext`.
pub struct PageHarness {
    pub backend: MockBackend,
    pub api: ApiClient,
    pub session: Session,
    pub toasts: Toaster,
}

impl PageHarness {
    pub async fn logged_out() -> Self {
        let backend = MockBackend::start().await;
        let api = backend.client();
        Self {
            backend,
            api,
            session: Session::default(),
            toasts: Toaster::default(),
        }
    }

    pub async fn logged_in(email: &str) -> Self {
        let mut harness = Self::logged_out().await;
        let token = harness.backend.issue_token(email);
        let user = harness.backend.user(email).expect("user just created");
        harness.session = Session::authenticated(user, &token);
        harness
    }

    pub fn ctx(&mut self) -> PageContext<'_> {
        PageContext::new(&self.api, &self.session, &mut self.toasts)
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts
            .pending()
            .iter()
            .map(|t| t.message.clone())
            .collect()
    }
}
