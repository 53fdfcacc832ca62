use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::header,
    response::IntoResponse,
    Json,
};
use ns_core::NewsReport;
use ns_inference::TopicTable;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use crate::error::ApiError;
use crate::AppState;

pub const WELCOME: &str = "Welcome to the News Summarization API!";

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub audio_file: String,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME }))
}

pub async fn fetch_news(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CompanyQuery>, QueryRejection>,
) -> Result<Json<NewsReport>, ApiError> {
    let Query(query) = query?;
    let report = state.manager.analyze(&query.company).await?;
    Ok(Json(report))
}

pub async fn generate_tts_query(
    State(state): State<Arc<AppState>>,
    request: Result<Query<SpeechRequest>, QueryRejection>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let Query(request) = request?;
    synthesize(&state, &request.text).await
}

pub async fn generate_tts_json(
    State(state): State<Arc<AppState>>,
    request: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let Json(request) = request?;
    synthesize(&state, &request.text).await
}

async fn synthesize(state: &AppState, text: &str) -> Result<Json<SpeechResponse>, ApiError> {
    let audio_file = state.manager.synthesize(text).await?;
    Ok(Json(SpeechResponse { audio_file }))
}

/// Serves a stored artifact by name as `audio/mpeg`.
pub async fn audio(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let audio = state.manager.load_audio(&name).await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

pub async fn list_topics(State(state): State<Arc<AppState>>) -> Json<TopicTable> {
    Json(state.manager.topics().clone())
}
