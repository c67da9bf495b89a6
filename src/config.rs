use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;

/// Which of the three services this process runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Service {
    MoviesInfo,
    MoviesReview,
    Movies,
}

impl Service {
    pub fn as_str(self) -> &'static str {
        match self {
            Service::MoviesInfo => "movies-info",
            Service::MoviesReview => "movies-review",
            Service::Movies => "movies",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            Service::MoviesInfo => 8080,
            Service::MoviesReview => 8081,
            Service::Movies => 8082,
        }
    }

    fn default_database_url(self) -> String {
        format!("sqlite://{}.db?mode=rwc", self.as_str())
    }
}

impl FromStr for Service {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movies-info" | "info" => Ok(Service::MoviesInfo),
            "movies-review" | "review" | "reviews" => Ok(Service::MoviesReview),
            "movies" | "aggregator" => Ok(Service::Movies),
            other => anyhow::bail!("unknown service {other:?}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub service: Service,
    pub addr: SocketAddr,
    pub database_url: String,
    pub movies_info_url: String,
    pub reviews_url: String,
    pub http_timeout: Duration,
    pub downstream_rps: u32,
    pub stream_capacity: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let service: Service =
            std::env::var("SERVICE").unwrap_or_else(|_| "movies-info".to_string()).parse()?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = match std::env::var("PORT") {
            Ok(port) => port.parse().context("PORT")?,
            Err(_) => service.default_port(),
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| service.default_database_url());

        let movies_info_url = std::env::var("MOVIES_INFO_URL")
            .unwrap_or_else(|_| "http://localhost:8080/v1/movieinfos".to_string());
        let reviews_url = std::env::var("REVIEWS_URL")
            .unwrap_or_else(|_| "http://localhost:8081/v1/reviews".to_string());

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        let downstream_rps: u32 =
            std::env::var("DOWNSTREAM_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(50);

        let stream_capacity: usize =
            std::env::var("STREAM_CAPACITY").ok().and_then(|s| s.parse().ok()).unwrap_or(64);

        Ok(Self {
            service,
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            movies_info_url,
            reviews_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            downstream_rps,
            stream_capacity,
        })
    }
}
