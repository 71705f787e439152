use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MapView, QuestionnaireAnswers},
    routes::AppState,
    services::FlowSnapshot,
};

#[derive(Debug, Deserialize)]
pub struct CityRequest {
    pub city: String,
}

/// Current flow state for the display layer
pub async fn snapshot(State(state): State<Arc<AppState>>) -> AppResult<Json<FlowSnapshot>> {
    state.auth.current_user().await?;
    Ok(Json(state.flow.snapshot().await))
}

/// Confirms a city and runs discovery; responds once venues are loaded
pub async fn confirm_city(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CityRequest>,
) -> AppResult<Json<FlowSnapshot>> {
    state.auth.current_user().await?;

    tracing::info!(request_id = %request_id, city = %request.city, "Processing city search");

    let snapshot = state.flow.confirm_city(&request.city).await?;

    tracing::info!(
        request_id = %request_id,
        venues = snapshot.venues.len(),
        "City search completed"
    );

    Ok(Json(snapshot))
}

pub async fn open_questionnaire(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<FlowSnapshot>> {
    state.auth.current_user().await?;
    Ok(Json(state.flow.open_questionnaire().await?))
}

pub async fn complete_questionnaire(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(answers): Json<QuestionnaireAnswers>,
) -> AppResult<Json<FlowSnapshot>> {
    state.auth.current_user().await?;

    tracing::info!(request_id = %request_id, "Processing questionnaire");

    Ok(Json(state.flow.complete_questionnaire(&answers).await?))
}

pub async fn cancel_processing(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<FlowSnapshot>> {
    state.auth.current_user().await?;
    Ok(Json(state.flow.cancel_processing().await?))
}

pub async fn toggle_labels(State(state): State<Arc<AppState>>) -> AppResult<Json<MapView>> {
    state.auth.current_user().await?;
    Ok(Json(state.flow.toggle_labels().await))
}

/// Venue photo proxied from the provider; `Venue.photo_url` points here
pub async fn photo(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.auth.current_user().await?;

    let photo = state.flow.photo(&reference).await?;

    Ok((
        [
            (header::CONTENT_TYPE, photo.content_type),
            (header::CACHE_CONTROL, "private, max-age=86400".to_string()),
        ],
        photo.bytes,
    ))
}
