//! HTTP clients for the catalog and review services.
//!
//! Every call returns a [`Fetched`] on success paths and a classified
//! [`DownstreamError`] otherwise, so callers decide per case what a missing
//! record means.

use std::{num::NonZeroU32, sync::Arc};

use anyhow::Context;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::{
    error::DownstreamError,
    models::{MovieInfo, Review},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Fetched<T> {
    Found(T),
    NotFound,
}

struct Downstream {
    service: &'static str,
    client: reqwest::Client,
    base_url: Url,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl Downstream {
    fn new(
        service: &'static str,
        client: reqwest::Client,
        base_url: &str,
        rps: u32,
    ) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid {service} url {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("{service} url {base_url} cannot carry a path");
        }
        let rps = NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Ok(Self { service, client, base_url, limiter })
    }

    fn url_for(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Fetched<T>, DownstreamError> {
        self.limiter.until_ready().await;

        debug!(service = self.service, url = %url, "calling downstream");
        let transport =
            |source: reqwest::Error| DownstreamError::Transport { service: self.service, source };
        let resp = self.client.get(url).query(query).send().await.map_err(transport)?;
        let status = resp.status();
        info!(service = self.service, status = status.as_u16(), "downstream responded");
        let body = resp.text().await.map_err(transport)?;

        let Some(body) = classify(self.service, status, body)? else {
            return Ok(Fetched::NotFound);
        };
        serde_json::from_str(&body).map(Fetched::Found).map_err(|err| {
            DownstreamError::UpstreamService {
                service: self.service,
                status,
                body: format!("malformed response body: {err}"),
            }
        })
    }
}

/// Sorts a downstream response into success (`Some(body)`), not found
/// (`None`) or one of the failure kinds.
fn classify(
    service: &'static str,
    status: StatusCode,
    body: String,
) -> Result<Option<String>, DownstreamError> {
    if status.is_success() {
        Ok(Some(body))
    } else if status == StatusCode::NOT_FOUND {
        Ok(None)
    } else if status.is_client_error() {
        Err(DownstreamError::ClientRequest { service, status, body })
    } else {
        Err(DownstreamError::UpstreamService { service, status, body })
    }
}

pub struct MoviesInfoClient {
    inner: Downstream,
}

impl MoviesInfoClient {
    pub fn new(client: reqwest::Client, base_url: &str, rps: u32) -> anyhow::Result<Self> {
        Ok(Self { inner: Downstream::new("movies-info", client, base_url, rps)? })
    }

    pub async fn retrieve_movie_info(
        &self,
        movie_id: &str,
    ) -> Result<Fetched<MovieInfo>, DownstreamError> {
        self.inner.get_json(self.inner.url_for(movie_id), &[]).await
    }
}

pub struct ReviewsClient {
    inner: Downstream,
}

impl ReviewsClient {
    pub fn new(client: reqwest::Client, base_url: &str, rps: u32) -> anyhow::Result<Self> {
        Ok(Self { inner: Downstream::new("movies-review", client, base_url, rps)? })
    }

    pub async fn retrieve_reviews(
        &self,
        movie_id: &str,
    ) -> Result<Fetched<Vec<Review>>, DownstreamError> {
        self.inner.get_json(self.inner.base_url.clone(), &[("movieInfoId", movie_id)]).await
    }
}
