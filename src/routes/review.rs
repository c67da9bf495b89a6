use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::WithRejection;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    events::ChangeFeed,
    models::{Review, ReviewQuery},
    store::ReviewStore,
    validation::{validate_review, validate_review_update},
};

pub struct ReviewState {
    pub store: ReviewStore,
    pub feed: ChangeFeed<Review>,
}

pub fn router(state: Arc<ReviewState>) -> Router {
    Router::new()
        .route("/v1/reviews", get(list_reviews).post(add_review))
        .route("/v1/reviews/stream", get(stream_reviews))
        .route("/v1/reviews/{id}", get(get_review).put(update_review).delete(delete_review))
        .with_state(state)
}

async fn add_review(
    State(state): State<Arc<ReviewState>>,
    WithRejection(Json(review), _): WithRejection<Json<Review>, AppError>,
) -> AppResult<(StatusCode, Json<Review>)> {
    validate_review(&review)?;
    let created = state.store.create(review).await?;
    state.feed.publish(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_reviews(
    State(state): State<Arc<ReviewState>>,
    Query(q): Query<ReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = match q.movie_info_id.as_deref() {
        Some(movie_info_id) => state.store.find_by_movie_info_id(movie_info_id).await?,
        None => state.store.list().await?,
    };
    Ok(Json(reviews))
}

async fn get_review(
    State(state): State<Arc<ReviewState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    state.store.get(&id).await?.map(Json).ok_or_else(|| not_found(&id))
}

async fn update_review(
    State(state): State<Arc<ReviewState>>,
    Path(id): Path<String>,
    WithRejection(Json(review), _): WithRejection<Json<Review>, AppError>,
) -> AppResult<Json<Review>> {
    validate_review_update(&review)?;
    state.store.update(&id, review).await?.map(Json).ok_or_else(|| not_found(&id))
}

async fn delete_review(
    State(state): State<Arc<ReviewState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.store.delete(&id).await? {
        debug!(id = %id, "no review to delete");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn stream_reviews(State(state): State<Arc<ReviewState>>) -> impl IntoResponse {
    state.feed.sse()
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("no Review with id {id}"))
}
