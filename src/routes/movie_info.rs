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
    models::{MovieInfo, MovieInfoQuery},
    store::MovieInfoStore,
    validation::validate_movie_info,
};

pub struct CatalogState {
    pub store: MovieInfoStore,
    pub feed: ChangeFeed<MovieInfo>,
}

pub fn router(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/v1/movieinfos", get(list_movie_infos).post(add_movie_info))
        .route("/v1/movieinfos/stream", get(stream_movie_infos))
        .route(
            "/v1/movieinfos/{id}",
            get(get_movie_info).put(update_movie_info).delete(delete_movie_info),
        )
        .with_state(state)
}

async fn add_movie_info(
    State(state): State<Arc<CatalogState>>,
    WithRejection(Json(info), _): WithRejection<Json<MovieInfo>, AppError>,
) -> AppResult<(StatusCode, Json<MovieInfo>)> {
    validate_movie_info(&info)?;
    let created = state.store.create(info).await?;
    state.feed.publish(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_movie_infos(
    State(state): State<Arc<CatalogState>>,
    Query(q): Query<MovieInfoQuery>,
) -> AppResult<Json<Vec<MovieInfo>>> {
    debug!(year = ?q.year, name = ?q.name, "listing movie infos");
    Ok(Json(state.store.find(q.year, q.name.as_deref()).await?))
}

async fn get_movie_info(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieInfo>> {
    state.store.get(&id).await?.map(Json).ok_or_else(|| not_found(&id))
}

async fn update_movie_info(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
    WithRejection(Json(info), _): WithRejection<Json<MovieInfo>, AppError>,
) -> AppResult<Json<MovieInfo>> {
    validate_movie_info(&info)?;
    state.store.update(&id, info).await?.map(Json).ok_or_else(|| not_found(&id))
}

async fn delete_movie_info(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !state.store.delete(&id).await? {
        debug!(id = %id, "no movie info to delete");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn stream_movie_infos(State(state): State<Arc<CatalogState>>) -> impl IntoResponse {
    state.feed.sse()
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("no MovieInfo with id {id}"))
}
