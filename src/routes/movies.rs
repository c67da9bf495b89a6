use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{aggregator::Aggregator, error::AppResult, models::Movie};

pub fn router(aggregator: Arc<Aggregator>) -> Router {
    Router::new().route("/v1/movies/{id}", get(movie_by_id)).with_state(aggregator)
}

async fn movie_by_id(
    State(aggregator): State<Arc<Aggregator>>,
    Path(id): Path<String>,
) -> AppResult<Json<Movie>> {
    aggregator.movie_by_id(&id).await.map(Json)
}
