use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::UserIdentity, routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserIdentity,
}

/// Verifies an identity token and caches the resulting session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    tracing::info!(request_id = %request_id, "Processing login");

    let user = state.auth.login(request.token.as_deref()).await?;

    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}

/// Drops the cached session and the flow that belonged to it
pub async fn logout(State(state): State<Arc<AppState>>) -> AppResult<StatusCode> {
    state.auth.logout().await?;
    state.flow.reset().await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<Arc<AppState>>) -> AppResult<Json<UserIdentity>> {
    Ok(Json(state.auth.current_user().await?))
}
