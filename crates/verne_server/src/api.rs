//! Content API router and handlers.

use crate::dto::{ContentView, GenerateBody, ListQuery, SummaryView, UpdateBody};
use crate::error::ApiError;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use verne_generation::{GenerationRequest, StoryPipeline, parse_kind};
use verne_interface::{ContentStore, ImageLookup, Page};

/// API state shared by all content handlers.
#[derive(Clone)]
pub struct ApiState {
    pipeline: Arc<StoryPipeline>,
    store: Arc<dyn ContentStore>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(pipeline: Arc<StoryPipeline>, store: Arc<dyn ContentStore>) -> Self {
        Self { pipeline, store }
    }
}

/// Creates the content API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/content/generate", post(generate_content))
        .route("/api/content", get(list_content))
        .route("/api/content/summary", get(list_summaries))
        .route("/api/content/years", get(list_years))
        .route(
            "/api/content/:id",
            get(get_content).patch(update_content).delete(delete_content),
        )
        .route("/api/content/:id/image", get(get_image))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Run the generation pipeline and persist the result.
async fn generate_content(
    State(state): State<ApiState>,
    Json(body): Json<GenerateBody>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&body.content_type)?;
    let mut request = GenerationRequest::new(kind).with_parameters(body.parameter_values);
    if let Some(year) = body.setting_year {
        request = request.with_year(year);
    }
    let record = state.pipeline.generate(request).await?;
    Ok((StatusCode::CREATED, Json(ContentView::from(record))))
}

/// List full records matching the query.
async fn list_content(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<ContentView>>, ApiError> {
    let (filter, page) = query.into_parts()?;
    let listed = state.store.list(&filter, &page).await?;
    Ok(Json(listed.map(ContentView::from)))
}

/// List lightweight summaries matching the query.
async fn list_summaries(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<SummaryView>>, ApiError> {
    let (filter, page) = query.into_parts()?;
    let listed = state.store.list_summaries(&filter, &page).await?;
    Ok(Json(listed.map(SummaryView::from)))
}

/// Distinct setting years across all records, ascending.
async fn list_years(State(state): State<ApiState>) -> Result<Json<Vec<i32>>, ApiError> {
    Ok(Json(state.store.distinct_years().await?))
}

/// Fetch one record by id.
async fn get_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContentView>, ApiError> {
    let record = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("content not found"))?;
    Ok(Json(ContentView::from(record)))
}

/// Serve a record's image bytes with cache headers.
///
/// The two miss cases get distinct messages: the record may not exist at
/// all, or it may exist without an image payload.
async fn get_image(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.image(&id).await? {
        ImageLookup::Found(blob) => {
            let headers = [
                (header::CONTENT_TYPE, blob.format.mime_type().to_string()),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
                (header::ETAG, format!("\"{id}\"")),
            ];
            Ok((headers, blob.bytes).into_response())
        }
        ImageLookup::NoImage => Err(ApiError::not_found("content has no image")),
        ImageLookup::NotFound => Err(ApiError::not_found("content not found")),
    }
}

/// Apply a partial update to a record.
async fn update_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<ContentView>, ApiError> {
    let record = state
        .store
        .update(&id, body.into_patch())
        .await?
        .ok_or_else(|| ApiError::not_found("content not found"))?;
    Ok(Json(ContentView::from(record)))
}

/// Delete a record, returning it.
async fn delete_content(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContentView>, ApiError> {
    let record = state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("content not found"))?;
    Ok(Json(ContentView::from(record)))
}
