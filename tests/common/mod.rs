#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Method, Request, StatusCode, header},
};
use moviestack::{
    aggregator::Aggregator,
    db::connect_and_migrate,
    downstream::{MoviesInfoClient, ReviewsClient},
    events::ChangeFeed,
    routes::{self, movie_info::CatalogState, review::ReviewState},
    store::{MovieInfoStore, ReviewStore},
};
use serde::{Serialize, de::DeserializeOwned};
use tower::ServiceExt;

pub async fn catalog_app() -> Router {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    routes::movie_info::router(Arc::new(CatalogState {
        store: MovieInfoStore::new(db),
        feed: ChangeFeed::new(16),
    }))
}

pub async fn review_app() -> Router {
    let db = connect_and_migrate("sqlite::memory:").await.unwrap();
    routes::review::router(Arc::new(ReviewState {
        store: ReviewStore::new(db),
        feed: ChangeFeed::new(16),
    }))
}

pub fn aggregator(movies_info_url: &str, reviews_url: &str) -> Aggregator {
    let http = reqwest::Client::builder().timeout(Duration::from_secs(5)).build().unwrap();
    Aggregator::new(
        MoviesInfoClient::new(http.clone(), movies_info_url, 100).unwrap(),
        ReviewsClient::new(http, reviews_url, 100).unwrap(),
    )
}

/// Serves `app` on an ephemeral local port.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(json)),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes)
}

pub async fn send_json<B: Serialize, T: DeserializeOwned>(
    app: &Router,
    method: Method,
    uri: &str,
    body: &B,
) -> (StatusCode, T) {
    let (status, bytes) = send(app, method, uri, Some(serde_json::to_string(body).unwrap())).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> (StatusCode, T) {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
