/// API Client: the single point of entry for all backend calls in SkillGap.
///
/// ARCHITECTURAL RULE: pages never build HTTP requests themselves.
/// Every call goes through `ApiClient::send` so URL composition, bearer
/// headers and failure classification stay uniform.
///
/// No retries, no timeout, no backoff: the caller decides what to show.
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod endpoints;

const API_PREFIX: &str = "/api";

/// Failure classes a page can observe. Status codes are not split further:
/// any non-2xx is `Rejected`, optionally carrying the backend's `detail`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached the client (DNS, refused, offline).
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Request failed (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the expected shape.
    #[error("Unexpected response payload: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }

    /// Human-readable backend detail, if the rejection carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// One backend call: method, path below `/api`, query pairs, optional
/// bearer token and optional JSON body.
#[derive(Debug)]
pub struct ApiRequest<'a, B: Serialize + ?Sized = ()> {
    method: Method,
    path: String,
    query: Vec<(&'a str, &'a str)>,
    token: Option<&'a str>,
    body: Option<&'a B>,
}

impl<'a> ApiRequest<'a, ()> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            token: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json<B: Serialize + ?Sized>(self, body: &'a B) -> ApiRequest<'a, B> {
        ApiRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            token: self.token,
            body: Some(body),
        }
    }
}

impl<'a, B: Serialize + ?Sized> ApiRequest<'a, B> {
    /// Attaches `Authorization: Bearer <token>` when a token is supplied.
    pub fn bearer(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    pub fn query(mut self, key: &'a str, value: &'a str) -> Self {
        self.query.push((key, value));
        self
    }
}

/// HTTP client bound to one backend origin.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(backend_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Connection)?;
        Ok(Self {
            client,
            base_url: format!("{}{API_PREFIX}", backend_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues the request and decodes a 2xx JSON body into `T`.
    pub async fn send<T, B>(&self, request: ApiRequest<'_, B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(
            "{} {} (authenticated: {})",
            request.method,
            request.path,
            request.token.is_some()
        );

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::Connection)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Connection)?;

        if !status.is_success() {
            debug!("{} {} rejected with {}", request.method, request.path, status);
            return Err(rejection(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    ApiError::Rejected {
        status: status.as_u16(),
        detail: extract_detail(body),
    }
}

/// Reads the optional `detail` field of an error body.
/// FastAPI validation errors carry a list of `{loc, msg, type}` objects
/// instead of a string; the first `msg` is used then.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
