//! Client application: owns the session store, the current screen and the
//! toast queue, and turns page effects into navigation.
//!
//! Navigation is a loop rather than recursion: resolve the guard, mount the
//! page, apply whatever effect the mount produced, repeat.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::errors::AppError;
use crate::models::ProgressUpdate;
use crate::pages::assessment::AssessmentPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::gap_analysis::GapAnalysisPage;
use crate::pages::layout;
use crate::pages::login::LoginPage;
use crate::pages::progress::ProgressPage;
use crate::pages::register::RegisterPage;
use crate::pages::resources::{ResourceFilter, ResourcesPage};
use crate::pages::roadmap::RoadmapPage;
use crate::pages::roles::CareerRolesPage;
use crate::pages::{Effect, PageContext, Toast, Toaster};
use crate::routes::guard::{self, GuardDecision};
use crate::routes::Route;
use crate::session::token_store::TokenStore;
use crate::session::{Session, SessionStore};

const SESSION_EXPIRED: &str = "Session expired. Please sign in again.";

#[derive(Debug)]
pub enum Screen {
    /// Nothing opened yet.
    Blank,
    Landing,
    Login(LoginPage),
    Register(RegisterPage),
    Dashboard(DashboardPage),
    Roles(CareerRolesPage),
    Assessment(AssessmentPage),
    GapAnalysis(GapAnalysisPage),
    Roadmap(RoadmapPage),
    Resources(ResourcesPage),
    Progress(ProgressPage),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Blank => "blank",
            Screen::Landing => "landing",
            Screen::Login(_) => "login",
            Screen::Register(_) => "register",
            Screen::Dashboard(_) => "dashboard",
            Screen::Roles(_) => "career roles",
            Screen::Assessment(_) => "assessment",
            Screen::GapAnalysis(_) => "gap analysis",
            Screen::Roadmap(_) => "roadmap",
            Screen::Resources(_) => "resources",
            Screen::Progress(_) => "progress",
        }
    }
}

fn wrong_screen(expected: &str, actual: &Screen) -> AppError {
    AppError::WrongScreen {
        expected: expected.to_string(),
        actual: actual.name().to_string(),
    }
}

pub struct App {
    api: ApiClient,
    sessions: SessionStore,
    toasts: Toaster,
    screen: Screen,
    location: Option<Route>,
}

impl App {
    /// Restores the session before anything else. No route is resolved
    /// until this returns.
    pub async fn start(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let sessions = SessionStore::initialize(&api, tokens).await;
        Self {
            api,
            sessions,
            toasts: Toaster::default(),
            screen: Screen::Blank,
            location: None,
        }
    }

    pub fn session(&self) -> &Session {
        self.sessions.session()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn location(&self) -> Option<&Route> {
        self.location.as_ref()
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    pub async fn open(&mut self, route: Route) -> Result<(), AppError> {
        self.show(route).await
    }

    // ────────────────────────────────────────────────────────────────────────
    // Navigation
    // ────────────────────────────────────────────────────────────────────────

    async fn show(&mut self, route: Route) -> Result<(), AppError> {
        let mut next = Some(route);
        while let Some(requested) = next.take() {
            let route = self.resolve(requested);
            info!("Navigating to {route}");
            let (screen, effect) = self.mount(&route).await?;
            self.screen = screen;
            self.location = Some(route);
            next = self.apply(effect).await;
        }
        Ok(())
    }

    /// Follows guard redirects until a route may render. Terminates because
    /// the redirect target of each access rule is itself allowed.
    fn resolve(&self, mut route: Route) -> Route {
        while let GuardDecision::Redirect(target) = guard::check(&route, self.session()) {
            info!("Redirecting {route} -> {target}");
            route = target;
        }
        route
    }

    async fn mount(&mut self, route: &Route) -> Result<(Screen, Option<Effect>), AppError> {
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        let screen = match route {
            Route::Landing => Screen::Landing,
            Route::Login => Screen::Login(LoginPage::default()),
            Route::Register => Screen::Register(RegisterPage::default()),
            Route::Dashboard => {
                let mut page = DashboardPage::default();
                page.mount(&mut ctx).await?;
                Screen::Dashboard(page)
            }
            Route::Roles => {
                let mut page = CareerRolesPage::default();
                page.mount(&mut ctx).await?;
                Screen::Roles(page)
            }
            Route::Assessment { role_id } => {
                let mut page = AssessmentPage::new(role_id.as_str());
                page.mount(&mut ctx).await?;
                Screen::Assessment(page)
            }
            Route::GapAnalysis { assessment_id } => {
                let mut page = GapAnalysisPage::new(assessment_id.as_str());
                page.mount(&mut ctx).await?;
                Screen::GapAnalysis(page)
            }
            Route::Roadmap { roadmap_id } => {
                let mut page = RoadmapPage::new(roadmap_id.as_str());
                page.mount(&mut ctx).await?;
                Screen::Roadmap(page)
            }
            Route::Resources => {
                let mut page = ResourcesPage::default();
                page.mount(&mut ctx).await?;
                Screen::Resources(page)
            }
            Route::Progress => {
                let mut page = ProgressPage::default();
                page.mount(&mut ctx).await?;
                Screen::Progress(page)
            }
        };
        Ok((screen, ctx.finish(None)))
    }

    /// Applies session changes and returns where to go next, if anywhere.
    async fn apply(&mut self, effect: Option<Effect>) -> Option<Route> {
        match effect? {
            Effect::Navigate(route) => Some(route),
            Effect::SignIn { auth, redirect } => {
                if let Err(e) = self.sessions.login(auth.user, auth.token).await {
                    warn!("Signed in, but the token was not persisted: {e}");
                }
                Some(redirect)
            }
            Effect::SignOut => {
                self.sign_out().await;
                Some(Route::Login)
            }
            Effect::SessionExpired => {
                self.toasts.error(SESSION_EXPIRED);
                self.sign_out().await;
                Some(Route::Login)
            }
        }
    }

    async fn sign_out(&mut self) {
        if let Err(e) = self.sessions.logout().await {
            warn!("Logged out, but the persisted token could not be removed: {e}");
        }
    }

    async fn follow(&mut self, effect: Option<Effect>) -> Result<(), AppError> {
        match self.apply(effect).await {
            Some(route) => self.show(route).await,
            None => Ok(()),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Page actions
    // ────────────────────────────────────────────────────────────────────────

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        let Screen::Login(page) = &mut self.screen else {
            return Err(wrong_screen("login", &self.screen));
        };
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        let effect = page.submit(&mut ctx, email, password).await?;
        let effect = ctx.finish(effect);
        self.follow(effect).await
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<(), AppError> {
        let Screen::Register(page) = &mut self.screen else {
            return Err(wrong_screen("register", &self.screen));
        };
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        let effect = page.submit(&mut ctx, name, email, password).await?;
        let effect = ctx.finish(effect);
        self.follow(effect).await
    }

    /// The layout's logout button.
    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.follow(Some(layout::logout())).await
    }

    pub async fn select_role(&mut self, role_id: &str) -> Result<(), AppError> {
        let Screen::Roles(page) = &self.screen else {
            return Err(wrong_screen("career roles", &self.screen));
        };
        let effect = page.select(role_id)?;
        self.follow(Some(effect)).await
    }

    pub fn rate(&mut self, skill: &str, level: u8) -> Result<(), AppError> {
        match &mut self.screen {
            Screen::Assessment(page) => page.rate(skill, level),
            other => Err(wrong_screen("assessment", other)),
        }
    }

    pub async fn submit_assessment(&mut self) -> Result<(), AppError> {
        let Screen::Assessment(page) = &mut self.screen else {
            return Err(wrong_screen("assessment", &self.screen));
        };
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        let effect = page.submit(&mut ctx).await?;
        let effect = ctx.finish(effect);
        self.follow(effect).await
    }

    pub async fn generate_roadmap(&mut self) -> Result<(), AppError> {
        let Screen::GapAnalysis(page) = &mut self.screen else {
            return Err(wrong_screen("gap analysis", &self.screen));
        };
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        let effect = page.generate_roadmap(&mut ctx).await?;
        let effect = ctx.finish(effect);
        self.follow(effect).await
    }

    pub fn set_resource_filter(&mut self, filter: ResourceFilter) -> Result<(), AppError> {
        match &mut self.screen {
            Screen::Resources(page) => {
                page.set_filter(filter);
                Ok(())
            }
            other => Err(wrong_screen("resources", other)),
        }
    }

    pub async fn record_progress(&mut self, role_id: &str, update: ProgressUpdate) -> Result<(), AppError> {
        let Screen::Progress(page) = &mut self.screen else {
            return Err(wrong_screen("progress", &self.screen));
        };
        let mut ctx = PageContext::new(&self.api, self.sessions.session(), &mut self.toasts);
        page.record(&mut ctx, role_id, update).await?;
        let effect = ctx.finish(None);
        self.follow(effect).await
    }
}
