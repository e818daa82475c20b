//! Web API module for Course Columns.
//!
//! This module provides a REST API over the course layout service, so that
//! a course page can fetch its column layout and course settings can be
//! edited remotely.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/defaults` - Site-wide layout defaults
//! - `GET /api/courses/{id}/settings` - Settings of a course
//! - `PUT /api/courses/{id}/settings` - Change the settings of a course
//! - `DELETE /api/courses/{id}/settings` - Forget the settings of a course
//! - `POST /api/courses/{id}/settings/reset` - Reset a course to the defaults
//! - `POST /api/settings/reset` - Reset every course to the defaults
//! - `GET /api/courses/{id}/layout` - Plan the layout of a stored outline
//! - `POST /api/layout` - Plan the layout of an outline sent in the body

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AdminDefaults, Config};
use crate::export::{HtmlColumnsRenderer, LayoutRenderer};
use crate::models::{CourseDisplay, CourseId, CourseOutline, LayoutConfig, Orientation};
use crate::services::{
    CourseLayoutService, CoursePlan, FileSettingsStore, OutlineDirectory, ResetScope,
    SectionProvider, SettingsStore, SettingsUpdate,
};

/// Layout service backed by the settings file and the outline directory.
pub type WebLayoutService = CourseLayoutService<FileSettingsStore, OutlineDirectory>;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Layout service shared by all handlers
    service: Arc<WebLayoutService>,
}

impl AppState {
    /// Creates state from a configuration and an outline directory.
    pub fn new(config: &Config, outlines_root: PathBuf) -> anyhow::Result<Self> {
        let store = FileSettingsStore::new(config.settings_file_path()?, config.defaults);
        Ok(Self::from_service(CourseLayoutService::new(
            store,
            OutlineDirectory::new(outlines_root),
        )))
    }

    /// Wraps an existing service.
    #[must_use]
    pub fn from_service(service: WebLayoutService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Returns the directory course outlines are read from.
    #[must_use]
    pub fn outlines_root(&self) -> &std::path::Path {
        self.service.provider().root()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Site defaults response.
#[derive(Debug, Serialize)]
pub struct DefaultsResponse {
    /// Default number of columns.
    pub columns: i64,
    /// Default orientation.
    pub orientation: Orientation,
    /// Default course display.
    pub course_display: CourseDisplay,
    /// Whether horizontal layouts use percentage widths.
    pub responsive: bool,
}

impl From<&AdminDefaults> for DefaultsResponse {
    fn from(defaults: &AdminDefaults) -> Self {
        Self {
            columns: defaults.columns,
            orientation: defaults.orientation,
            course_display: defaults.course_display,
            responsive: defaults.responsive,
        }
    }
}

/// Course settings response.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Course identifier.
    pub course: CourseId,
    /// Whether settings are stored for this course, as opposed to defaults.
    pub stored: bool,
    /// Effective settings.
    pub settings: LayoutConfig,
}

/// Reset response.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Number of courses whose settings were reset.
    pub reset: usize,
}

/// Query parameters of the layout endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    /// Write a corrected column count back to the store (default true).
    pub write_back: Option<bool>,
    /// Include the rendered HTML fragment.
    #[serde(default)]
    pub html: bool,
}

/// Planned layout response.
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    /// Planned layout.
    #[serde(flatten)]
    pub plan: CoursePlan,
    /// Rendered HTML fragment, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn internal(error: &str, e: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, format!("{e:#}"))),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/defaults - Site-wide defaults.
async fn get_defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse::from(&state.service.store().defaults()))
}

/// GET /api/courses/{id}/settings - Settings of a course.
async fn get_settings(
    State(state): State<AppState>,
    Path(course): Path<CourseId>,
) -> ApiResult<Json<SettingsResponse>> {
    let store = state.service.store();
    let stored = store
        .stored(course)
        .map_err(|e| internal("Failed to read settings", &e))?;

    Ok(Json(SettingsResponse {
        course,
        stored: stored.is_some(),
        settings: stored.unwrap_or_else(|| store.defaults().layout_config()),
    }))
}

/// PUT /api/courses/{id}/settings - Change the settings of a course.
async fn update_settings(
    State(state): State<AppState>,
    Path(course): Path<CourseId>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<SettingsResponse>> {
    update.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid settings", e)),
        )
    })?;

    let settings = state
        .service
        .update_settings(course, &update)
        .map_err(|e| internal("Failed to save settings", &e))?;

    let stored = state
        .service
        .store()
        .stored(course)
        .map_err(|e| internal("Failed to read settings", &e))?
        .is_some();

    Ok(Json(SettingsResponse {
        course,
        stored,
        settings,
    }))
}

/// DELETE /api/courses/{id}/settings - Forget the settings of a course.
async fn delete_settings(
    State(state): State<AppState>,
    Path(course): Path<CourseId>,
) -> ApiResult<StatusCode> {
    let removed = state
        .service
        .delete(course)
        .map_err(|e| internal("Failed to delete settings", &e))?;

    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("No settings stored for course {course}"))),
        ))
    }
}

/// POST /api/courses/{id}/settings/reset - Reset a course to the defaults.
async fn reset_course(
    State(state): State<AppState>,
    Path(course): Path<CourseId>,
) -> ApiResult<Json<ResetResponse>> {
    let reset = state
        .service
        .reset(ResetScope::Course(course))
        .map_err(|e| internal("Failed to reset settings", &e))?;
    Ok(Json(ResetResponse { reset }))
}

/// POST /api/settings/reset - Reset every course to the defaults.
async fn reset_all(State(state): State<AppState>) -> ApiResult<Json<ResetResponse>> {
    let reset = state
        .service
        .reset(ResetScope::All)
        .map_err(|e| internal("Failed to reset settings", &e))?;
    Ok(Json(ResetResponse { reset }))
}

/// GET /api/courses/{id}/layout - Plan the layout of a stored outline.
async fn get_course_layout(
    State(state): State<AppState>,
    Path(course): Path<CourseId>,
    Query(query): Query<LayoutQuery>,
) -> ApiResult<Json<LayoutResponse>> {
    let outline = state.service.provider().outline(course).map_err(|e| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::with_details(
                format!("Course outline not found: {course}"),
                format!("{e:#}"),
            )),
        )
    })?;
    plan_layout(&state, &outline, &query)
}

/// POST /api/layout - Plan the layout of an outline sent in the body.
async fn post_layout(
    State(state): State<AppState>,
    Query(query): Query<LayoutQuery>,
    Json(outline): Json<CourseOutline>,
) -> ApiResult<Json<LayoutResponse>> {
    plan_layout(&state, &outline, &query)
}

fn plan_layout(
    state: &AppState,
    outline: &CourseOutline,
    query: &LayoutQuery,
) -> ApiResult<Json<LayoutResponse>> {
    outline.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::with_details("Invalid course outline", format!("{e:#}"))),
        )
    })?;

    let plan = state
        .service
        .plan(outline, query.write_back.unwrap_or(true))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::with_details("Failed to plan layout", format!("{e:#}"))),
            )
        })?;

    let html = query
        .html
        .then(|| HtmlColumnsRenderer.render(outline, &plan.settings, &plan.layout));

    Ok(Json(LayoutResponse { plan, html }))
}

// ============================================================================
// Router
// ============================================================================

/// Builds the API router.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run next to the course site
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Settings endpoints
        .route("/api/defaults", get(get_defaults))
        .route(
            "/api/courses/{id}/settings",
            get(get_settings)
                .put(update_settings)
                .delete(delete_settings),
        )
        .route("/api/courses/{id}/settings/reset", post(reset_course))
        .route("/api/settings/reset", post(reset_all))
        // Layout endpoints
        .route("/api/courses/{id}/layout", get(get_course_layout))
        .route("/api/layout", post(post_layout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the web server.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `outlines_root` - Directory holding `<course id>.json|yaml` outlines
/// * `addr` - Socket address to bind to
pub async fn run_server(
    config: Config,
    outlines_root: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(&config, outlines_root)?;
    let app = create_router(state);

    info!("Starting Course Columns web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
