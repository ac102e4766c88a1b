// Axum API Server Module
//
// Purpose: HTTP boundary over the two engines. Bodies are validated by the
// `BikeSetup` deserializer before any handler runs; handlers only render
// engine output.

#[cfg(feature = "api")]
use axum::{
    extract::{Query, State},
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::baseline::Recommendations;

#[cfg(feature = "api")]
use crate::diagnosis::DiagnosisResult;

#[cfg(feature = "api")]
use crate::model::BikeSetup;

#[cfg(feature = "api")]
use crate::reference::{ReferencePaths, ReferenceStore};

#[cfg(feature = "api")]
use crate::tuner::SuspensionTuner;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup, never mutated
    pub tuner: Arc<SuspensionTuner>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(store: ReferenceStore) -> Self {
        Self {
            tuner: Arc::new(SuspensionTuner::new(store)),
        }
    }

    pub fn load(paths: &ReferencePaths) -> Self {
        tracing::info!(
            "Loading reference data from {} and {}",
            paths.specs.display(),
            paths.rules.display()
        );
        Self {
            tuner: Arc::new(SuspensionTuner::load(paths)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Engines
        .route("/api/calculate-setup", post(calculate_setup))
        .route("/api/diagnose", post(diagnose_issue))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive()) // Allow all origins
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn calculate_setup(
    State(state): State<AppState>,
    body: Result<Json<BikeSetup>, JsonRejection>,
) -> Result<Json<Recommendations>, AppError> {
    let Json(setup) = body?;
    Ok(Json(state.tuner.compute_baseline(&setup)))
}

/// Query params for diagnosis
#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct DiagnoseQuery {
    symptom_id: String,
}

#[cfg(feature = "api")]
async fn diagnose_issue(
    State(state): State<AppState>,
    query: Result<Query<DiagnoseQuery>, QueryRejection>,
    body: Result<Json<BikeSetup>, JsonRejection>,
) -> Result<Json<DiagnosisResult>, AppError> {
    let Query(params) = query?;
    let Json(setup) = body?;
    let result = state.tuner.diagnose(&setup, &params.symptom_id);
    if !result.is_resolved() {
        tracing::info!("Diagnosis for '{}' unresolved: {:?}", params.symptom_id, result);
    }
    Ok(Json(result))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    /// Body failed to parse or violated a setup invariant
    InvalidSetup(StatusCode, String),
    /// Missing or malformed query string
    InvalidQuery(StatusCode, String),
}

#[cfg(feature = "api")]
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.status(), rejection.body_text())
    }
}

#[cfg(feature = "api")]
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidSetup(rejection.status(), rejection.body_text())
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidSetup(status, msg) => (status, msg),
            AppError::InvalidQuery(status, msg) => (status, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
