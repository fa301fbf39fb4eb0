//! Typed wrappers, one per backend endpoint the client consumes.
//!
//! Endpoints marked "bearer" take the session token; the others are public.

use super::{ApiClient, ApiError, ApiRequest};
use crate::models::{
    Assessment, AuthResponse, CareerRole, Credentials, GapAnalysis, NewAssessment, ProgressRecord,
    ProgressUpdate, Registration, Resource, Roadmap, UserProfile,
};

impl ApiClient {
    /// GET /auth/me (bearer). Used only while restoring a session.
    pub async fn me(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.send(ApiRequest::get("/auth/me").bearer(Some(token)))
            .await
    }

    /// POST /auth/login
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.send(ApiRequest::post("/auth/login").json(credentials))
            .await
    }

    /// POST /auth/register
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.send(ApiRequest::post("/auth/register").json(registration))
            .await
    }

    /// GET /roles
    pub async fn roles(&self) -> Result<Vec<CareerRole>, ApiError> {
        self.send(ApiRequest::get("/roles")).await
    }

    /// GET /roles/{id}
    pub async fn role(&self, role_id: &str) -> Result<CareerRole, ApiError> {
        self.send(ApiRequest::get(format!("/roles/{role_id}")))
            .await
    }

    /// POST /assessments (bearer)
    pub async fn create_assessment(
        &self,
        token: Option<&str>,
        assessment: &NewAssessment,
    ) -> Result<Assessment, ApiError> {
        self.send(
            ApiRequest::post("/assessments")
                .json(assessment)
                .bearer(token),
        )
        .await
    }

    /// GET /assessments (bearer)
    pub async fn assessments(&self, token: Option<&str>) -> Result<Vec<Assessment>, ApiError> {
        self.send(ApiRequest::get("/assessments").bearer(token))
            .await
    }

    /// POST /analysis/gap?assessment_id= (bearer)
    pub async fn analyze_gap(
        &self,
        token: Option<&str>,
        assessment_id: &str,
    ) -> Result<GapAnalysis, ApiError> {
        self.send(
            ApiRequest::post("/analysis/gap")
                .query("assessment_id", assessment_id)
                .bearer(token),
        )
        .await
    }

    /// POST /roadmap/generate?analysis_id= (bearer)
    pub async fn generate_roadmap(
        &self,
        token: Option<&str>,
        analysis_id: &str,
    ) -> Result<Roadmap, ApiError> {
        self.send(
            ApiRequest::post("/roadmap/generate")
                .query("analysis_id", analysis_id)
                .bearer(token),
        )
        .await
    }

    /// GET /roadmap (bearer)
    pub async fn roadmaps(&self, token: Option<&str>) -> Result<Vec<Roadmap>, ApiError> {
        self.send(ApiRequest::get("/roadmap").bearer(token)).await
    }

    /// GET /progress (bearer)
    pub async fn progress(&self, token: Option<&str>) -> Result<Vec<ProgressRecord>, ApiError> {
        self.send(ApiRequest::get("/progress").bearer(token)).await
    }

    /// POST /progress?career_role_id= (bearer)
    pub async fn record_progress(
        &self,
        token: Option<&str>,
        career_role_id: &str,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, ApiError> {
        self.send(
            ApiRequest::post("/progress")
                .query("career_role_id", career_role_id)
                .json(update)
                .bearer(token),
        )
        .await
    }

    /// GET /resources
    pub async fn resources(&self) -> Result<Vec<Resource>, ApiError> {
        self.send(ApiRequest::get("/resources")).await
    }
}
