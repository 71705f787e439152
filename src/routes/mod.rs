use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{AuthService, FlowOrchestrator},
};

pub mod auth;
pub mod flow;
pub mod merch;

/// Shared application state
pub struct AppState {
    pub flow: FlowOrchestrator,
    pub auth: Arc<AuthService>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/google", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/merch", get(merch::list))
        .route("/v1/flow", get(flow::snapshot))
        .route("/v1/flow/city", post(flow::confirm_city))
        .route("/v1/flow/questionnaire/open", post(flow::open_questionnaire))
        .route("/v1/flow/questionnaire", post(flow::complete_questionnaire))
        .route("/v1/flow/questionnaire/cancel", post(flow::cancel_processing))
        .route("/v1/map/labels", post(flow::toggle_labels))
        .route("/v1/photos/:reference", get(flow::photo))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
