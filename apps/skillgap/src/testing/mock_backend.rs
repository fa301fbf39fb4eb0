//! In-process stand-in for the SkillGap backend.
//!
//! Serves the same `/api` surface on an ephemeral port with in-memory state.
//! Gap and roadmap derivation follow the backend's observable rules so the
//! workflow chain can be exercised end to end. Any route can be forced to
//! fail with a 500 via `MockBackend::fail`.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api_client::ApiClient;
use crate::models::{
    Assessment, AuthResponse, CareerRole, Credentials, GapAnalysis, NewAssessment, Priority,
    ProgressRecord, ProgressUpdate, Registration, RequiredSkill, Resource, Roadmap, RoadmapItem,
    SkillGap, SkillProgress, UserProfile,
};

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Error body shaped like the backend's: `{"detail": "..."}`.
#[derive(Debug)]
struct MockError(StatusCode, String);

impl MockError {
    fn not_found(what: &str) -> Self {
        Self(StatusCode::NOT_FOUND, format!("{what} not found"))
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Store {
    users: HashMap<String, UserProfile>,
    passwords: HashMap<String, (String, String)>,
    tokens: HashMap<String, String>,
    roles: Vec<CareerRole>,
    assessments: Vec<(String, Assessment)>,
    analyses: Vec<(String, GapAnalysis)>,
    roadmaps: Vec<(String, Roadmap)>,
    progress: Vec<(String, ProgressRecord)>,
    resources: Vec<Resource>,
    failing: HashSet<String>,
    hits: HashMap<String, usize>,
}

#[derive(Clone, Default)]
struct MockState(Arc<Mutex<Store>>);

impl MockState {
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store {
    fn user_for(&self, headers: &HeaderMap) -> Result<String, MockError> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| MockError(StatusCode::FORBIDDEN, "Not authenticated".into()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| MockError(StatusCode::FORBIDDEN, "Not authenticated".into()))?;
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| MockError(StatusCode::UNAUTHORIZED, "Invalid token".into()))
    }

    fn create_user(&mut self, name: &str, email: &str, password: &str) -> UserProfile {
        let user = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: None,
        };
        self.users.insert(user.id.clone(), user.clone());
        self.passwords
            .insert(email.to_string(), (password.to_string(), user.id.clone()));
        user
    }

    fn issue_token(&mut self, user_id: &str) -> String {
        let token = format!("tok-{}", Uuid::new_v4());
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handle
// ────────────────────────────────────────────────────────────────────────────

pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Binds an ephemeral port and serves seeded roles and resources.
    pub async fn start() -> Self {
        let state = MockState::default();
        {
            let mut store = state.lock();
            store.roles = seed_roles();
            store.resources = seed_resources();
        }

        let app = build_router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.url()).expect("api client")
    }

    /// Creates the user on first use and returns a fresh valid token.
    pub fn issue_token(&self, email: &str) -> String {
        let mut store = self.state.lock();
        let user_id = match store.passwords.get(email) {
            Some((_, id)) => id.clone(),
            None => store.create_user("Ada Lovelace", email, "secret-password").id,
        };
        store.issue_token(&user_id)
    }

    pub fn user(&self, email: &str) -> Option<UserProfile> {
        let store = self.state.lock();
        let (_, id) = store.passwords.get(email)?;
        store.users.get(id).cloned()
    }

    /// Invalidates every issued token, as a backend restart with a new
    /// signing secret would.
    pub fn revoke_tokens(&self) {
        self.state.lock().tokens.clear();
    }

    /// Makes `"<METHOD> <path>"` (path below `/api`) answer 500.
    pub fn fail(&self, route: &str) {
        self.state.lock().failing.insert(route.to_string());
    }

    /// Number of requests seen for `"<METHOD> <path>"`.
    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().hits.get(route).copied().unwrap_or(0)
    }

    pub fn add_progress(&self, email: &str, record: ProgressRecord) {
        let mut store = self.state.lock();
        let user_id = store
            .passwords
            .get(email)
            .map(|(_, id)| id.clone())
            .expect("user must exist before seeding progress");
        store.progress.push((user_id, record));
    }

    pub fn add_assessment(&self, email: &str, assessment: Assessment) {
        let mut store = self.state.lock();
        let user_id = store
            .passwords
            .get(email)
            .map(|(_, id)| id.clone())
            .expect("user must exist before seeding assessments");
        store.assessments.push((user_id, assessment));
    }

    pub fn add_roadmap(&self, email: &str, roadmap: Roadmap) {
        let mut store = self.state.lock();
        let user_id = store
            .passwords
            .get(email)
            .map(|(_, id)| id.clone())
            .expect("user must exist before seeding roadmaps");
        store.roadmaps.push((user_id, roadmap));
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A URL nothing listens on, for connection-error tests.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

// ────────────────────────────────────────────────────────────────────────────
// Router
// ────────────────────────────────────────────────────────────────────────────

fn build_router(state: MockState) -> Router {
    Router::new()
        .route("/api/auth/me", get(handle_me))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/register", post(handle_register))
        .route("/api/roles", get(handle_roles))
        .route("/api/roles/:id", get(handle_role))
        .route(
            "/api/assessments",
            get(handle_list_assessments).post(handle_create_assessment),
        )
        .route("/api/analysis/gap", post(handle_analyze_gap))
        .route("/api/roadmap/generate", post(handle_generate_roadmap))
        .route("/api/roadmap", get(handle_list_roadmaps))
        .route(
            "/api/progress",
            get(handle_list_progress).post(handle_record_progress),
        )
        .route("/api/resources", get(handle_resources))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_and_inject_failures,
        ))
        .with_state(state)
}

async fn count_and_inject_failures(
    State(state): State<MockState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().trim_start_matches("/api");
    let key = format!("{} {}", request.method(), path);
    let failing = {
        let mut store = state.lock();
        *store.hits.entry(key.clone()).or_default() += 1;
        store.failing.contains(&key)
    };
    if failing {
        return MockError(StatusCode::INTERNAL_SERVER_ERROR, "Injected failure".into())
            .into_response();
    }
    next.run(request).await
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn handle_me(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, MockError> {
    let store = state.lock();
    let user_id = store.user_for(&headers)?;
    store
        .users
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("User"))
}

async fn handle_login(
    State(state): State<MockState>,
    Json(req): Json<Credentials>,
) -> Result<Json<AuthResponse>, MockError> {
    let mut store = state.lock();
    let user_id = match store.passwords.get(&req.email) {
        Some((password, id)) if *password == req.password => id.clone(),
        _ => {
            return Err(MockError(
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".into(),
            ))
        }
    };
    let token = store.issue_token(&user_id);
    let user = store
        .users
        .get(&user_id)
        .cloned()
        .ok_or_else(|| MockError::not_found("User"))?;
    Ok(Json(AuthResponse { user, token }))
}

async fn handle_register(
    State(state): State<MockState>,
    Json(req): Json<Registration>,
) -> Result<Json<AuthResponse>, MockError> {
    let mut store = state.lock();
    if store.passwords.contains_key(&req.email) {
        return Err(MockError(
            StatusCode::BAD_REQUEST,
            "Email already registered".into(),
        ));
    }
    let user = store.create_user(&req.name, &req.email, &req.password);
    let token = store.issue_token(&user.id);
    Ok(Json(AuthResponse { user, token }))
}

async fn handle_roles(State(state): State<MockState>) -> Json<Vec<CareerRole>> {
    Json(state.lock().roles.clone())
}

async fn handle_role(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> Result<Json<CareerRole>, MockError> {
    state
        .lock()
        .roles
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("Role"))
}

async fn handle_create_assessment(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<NewAssessment>,
) -> Result<Json<Assessment>, MockError> {
    let mut store = state.lock();
    let user_id = store.user_for(&headers)?;
    let assessment = Assessment {
        id: Uuid::new_v4().to_string(),
        career_role_id: req.career_role_id,
        skills: req.skills.into_iter().map(Into::into).collect(),
        user_id: Some(user_id.clone()),
        created_at: None,
    };
    store.assessments.push((user_id, assessment.clone()));
    Ok(Json(assessment))
}

async fn handle_list_assessments(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Assessment>>, MockError> {
    let store = state.lock();
    let user_id = store.user_for(&headers)?;
    Ok(Json(owned_by(&store.assessments, &user_id)))
}

#[derive(Deserialize)]
struct AssessmentIdQuery {
    assessment_id: String,
}

async fn handle_analyze_gap(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(q): Query<AssessmentIdQuery>,
) -> Result<Json<GapAnalysis>, MockError> {
    let mut store = state.lock();
    let user_id = store.user_for(&headers)?;
    let assessment = store
        .assessments
        .iter()
        .find(|(owner, a)| *owner == user_id && a.id == q.assessment_id)
        .map(|(_, a)| a.clone())
        .ok_or_else(|| MockError::not_found("Assessment"))?;
    let role = store
        .roles
        .iter()
        .find(|r| r.id == assessment.career_role_id)
        .cloned()
        .ok_or_else(|| MockError::not_found("Role"))?;

    let analysis = derive_gap_analysis(&role, &assessment);
    store.analyses.push((user_id, analysis.clone()));
    Ok(Json(analysis))
}

#[derive(Deserialize)]
struct AnalysisIdQuery {
    analysis_id: String,
}

async fn handle_generate_roadmap(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(q): Query<AnalysisIdQuery>,
) -> Result<Json<Roadmap>, MockError> {
    let mut store = state.lock();
    let user_id = store.user_for(&headers)?;
    let analysis = store
        .analyses
        .iter()
        .find(|(owner, a)| *owner == user_id && a.id == q.analysis_id)
        .map(|(_, a)| a.clone())
        .ok_or_else(|| MockError::not_found("Analysis"))?;

    let roadmap = derive_roadmap(&analysis);
    store.roadmaps.push((user_id, roadmap.clone()));
    Ok(Json(roadmap))
}

async fn handle_list_roadmaps(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Roadmap>>, MockError> {
    let store = state.lock();
    let user_id = store.user_for(&headers)?;
    Ok(Json(owned_by(&store.roadmaps, &user_id)))
}

async fn handle_list_progress(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ProgressRecord>>, MockError> {
    let store = state.lock();
    let user_id = store.user_for(&headers)?;
    Ok(Json(owned_by(&store.progress, &user_id)))
}

#[derive(Deserialize)]
struct RoleIdQuery {
    career_role_id: String,
}

async fn handle_record_progress(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(q): Query<RoleIdQuery>,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<ProgressRecord>, MockError> {
    let mut store = state.lock();
    let user_id = store.user_for(&headers)?;
    let existing = store
        .progress
        .iter_mut()
        .find(|(owner, p)| *owner == user_id && p.career_role_id == q.career_role_id);

    let record = match existing {
        Some((_, record)) => {
            match record
                .skill_progress
                .iter_mut()
                .find(|sp| sp.skill == update.skill)
            {
                Some(sp) => {
                    sp.progress = update.progress;
                    sp.notes = update.notes;
                }
                None => record.skill_progress.push(SkillProgress {
                    skill: update.skill,
                    progress: update.progress,
                    notes: update.notes,
                }),
            }
            let total: u32 = record
                .skill_progress
                .iter()
                .map(|sp| u32::from(sp.progress))
                .sum();
            record.overall_progress = (total / record.skill_progress.len() as u32) as u8;
            record.clone()
        }
        None => {
            let record = ProgressRecord {
                id: Uuid::new_v4().to_string(),
                career_role_id: q.career_role_id,
                overall_progress: update.progress,
                skill_progress: vec![SkillProgress {
                    skill: update.skill,
                    progress: update.progress,
                    notes: update.notes,
                }],
                updated_at: None,
            };
            store.progress.push((user_id, record.clone()));
            record
        }
    };
    Ok(Json(record))
}

async fn handle_resources(State(state): State<MockState>) -> Json<Vec<Resource>> {
    Json(state.lock().resources.clone())
}

fn owned_by<T: Clone>(rows: &[(String, T)], user_id: &str) -> Vec<T> {
    rows.iter()
        .filter(|(owner, _)| owner == user_id)
        .map(|(_, row)| row.clone())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Derivation rules
// ────────────────────────────────────────────────────────────────────────────

fn required_level(target: &str) -> u8 {
    match target {
        "Beginner" => 3,
        "Intermediate" => 4,
        _ => 5,
    }
}

fn derive_gap_analysis(role: &CareerRole, assessment: &Assessment) -> GapAnalysis {
    let mut skill_gaps = Vec::new();
    let mut readiness_sum = 0.0;

    for req in &role.required_skills {
        let current = assessment
            .skills
            .iter()
            .find(|s| s.skill_name == req.name)
            .map(|s| s.current_level)
            .unwrap_or(0);
        let required = required_level(&req.level);
        let gap = i32::from(required) - i32::from(current);
        readiness_sum += (f64::from(current) / f64::from(required) * 100.0).min(100.0);

        if gap > 0 {
            skill_gaps.push(SkillGap {
                skill: req.name.clone(),
                category: Some(req.category.clone()),
                current_level: current,
                required_level: required,
                gap,
                priority: match gap {
                    g if g >= 3 => Priority::High,
                    2 => Priority::Medium,
                    _ => Priority::Low,
                },
            });
        }
    }

    let total = role.required_skills.len().max(1) as f64;
    GapAnalysis {
        id: Uuid::new_v4().to_string(),
        career_role_id: Some(role.id.clone()),
        readiness_score: (readiness_sum / total * 10.0).round() / 10.0,
        skill_gaps,
        ai_insights: format!("Focus first on the high priority gaps for {}.", role.title),
        created_at: None,
    }
}

fn derive_roadmap(analysis: &GapAnalysis) -> Roadmap {
    let mut gaps = analysis.skill_gaps.clone();
    gaps.sort_by_key(|g| g.priority);

    let mut total_weeks = 0;
    let roadmap_items = gaps
        .iter()
        .map(|gap| {
            let weeks = gap.gap * 2;
            total_weeks += weeks;
            RoadmapItem {
                skill: gap.skill.clone(),
                priority: gap.priority,
                estimated_time: format!("{weeks} weeks"),
                resources: vec![],
                milestones: vec![
                    format!("Complete beginner tutorials for {}", gap.skill),
                    format!("Build 2-3 practice projects using {}", gap.skill),
                    format!("Achieve intermediate proficiency in {}", gap.skill),
                ],
            }
        })
        .collect();

    Roadmap {
        id: Uuid::new_v4().to_string(),
        career_role_id: analysis.career_role_id.clone(),
        total_duration: format!("{total_weeks} weeks (~{} months)", total_weeks / 4),
        roadmap_items,
        ai_recommendations: "Work through the items in priority order.".to_string(),
        created_at: None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Seed data
// ────────────────────────────────────────────────────────────────────────────

pub const DATA_ANALYST: &str = "role-data-analyst";
pub const FRONTEND_DEVELOPER: &str = "role-frontend";

fn skill(name: &str, category: &str, level: &str) -> RequiredSkill {
    RequiredSkill {
        name: name.to_string(),
        category: category.to_string(),
        level: level.to_string(),
    }
}

fn seed_roles() -> Vec<CareerRole> {
    vec![
        CareerRole {
            id: DATA_ANALYST.to_string(),
            title: "Data Analyst".to_string(),
            description: "Turn raw data into decisions".to_string(),
            average_salary: "$75,000".to_string(),
            growth_rate: "+23%".to_string(),
            required_skills: vec![
                skill("SQL", "Database", "Intermediate"),
                skill("Python", "Programming", "Beginner"),
                skill("Data Visualization", "Analytics", "Advanced"),
            ],
        },
        CareerRole {
            id: FRONTEND_DEVELOPER.to_string(),
            title: "Frontend Developer".to_string(),
            description: "Build user interfaces for the web".to_string(),
            average_salary: "$85,000".to_string(),
            growth_rate: "+16%".to_string(),
            required_skills: vec![
                skill("JavaScript", "Programming", "Intermediate"),
                skill("React", "Frontend", "Intermediate"),
                skill("CSS", "Frontend", "Beginner"),
            ],
        },
    ]
}

fn resource(id: &str, title: &str, kind: &str, difficulty: &str, skills: &[&str]) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} from scratch"),
        kind: kind.to_string(),
        difficulty: difficulty.to_string(),
        duration: "4 hours".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        url: format!("https://learn.example.com/{id}"),
    }
}

fn seed_resources() -> Vec<Resource> {
    vec![
        resource("res-sql", "SQL Basics", "Course", "Beginner", &["SQL"]),
        resource("res-pandas", "Pandas Deep Dive", "Tutorial", "Intermediate", &["Python", "Data Analysis"]),
        resource("res-react", "React Patterns", "Video", "Advanced", &["React", "JavaScript"]),
        resource("res-css", "Modern CSS Layout", "Article", "Beginner", &["CSS"]),
    ]
}
