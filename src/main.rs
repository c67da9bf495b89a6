use std::sync::Arc;

use axum::Router;
use moviestack::{
    aggregator::Aggregator,
    config::{Config, Service},
    db,
    downstream::{MoviesInfoClient, ReviewsClient},
    events::ChangeFeed,
    routes::{
        self,
        movie_info::CatalogState,
        review::ReviewState,
    },
    store::{MovieInfoStore, ReviewStore},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviestack=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let app = match config.service {
        Service::MoviesInfo => {
            let db = db::connect_and_migrate(&config.database_url).await?;
            routes::movie_info::router(Arc::new(CatalogState {
                store: MovieInfoStore::new(db),
                feed: ChangeFeed::new(config.stream_capacity),
            }))
        },
        Service::MoviesReview => {
            let db = db::connect_and_migrate(&config.database_url).await?;
            routes::review::router(Arc::new(ReviewState {
                store: ReviewStore::new(db),
                feed: ChangeFeed::new(config.stream_capacity),
            }))
        },
        Service::Movies => {
            let http = reqwest::Client::builder()
                .user_agent("moviestack/0.1")
                .timeout(config.http_timeout)
                .build()?;
            let movies_info =
                MoviesInfoClient::new(http.clone(), &config.movies_info_url, config.downstream_rps)?;
            let reviews = ReviewsClient::new(http, &config.reviews_url, config.downstream_rps)?;
            tracing::info!(
                movies_info_url = %config.movies_info_url,
                reviews_url = %config.reviews_url,
                "aggregating from downstream services"
            );
            routes::movies::router(Arc::new(Aggregator::new(movies_info, reviews)))
        },
    };

    let app: Router = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)),
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(service = config.service.as_str(), addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
