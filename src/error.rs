use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of a call to another service, classified by how it failed.
#[derive(Debug, thiserror::Error)]
pub enum DownstreamError {
    /// The downstream service rejected the request with a 4xx other than 404.
    #[error("{service} rejected the request ({status}): {body}")]
    ClientRequest { service: &'static str, status: StatusCode, body: String },

    /// The downstream service failed with a 5xx, or answered with something unusable.
    #[error("{service} failed ({status}): {body}")]
    UpstreamService { service: &'static str, status: StatusCode, body: String },

    /// The downstream service could not be reached at all.
    #[error("{service} is unreachable: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{}", .0.join(","))]
    Validation(Vec<String>),

    /// Request body that is not JSON or does not fit the record shape.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<jiff::Error> for AppError {
    fn from(err: jiff::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Downstream(DownstreamError::ClientRequest { status, .. }) => *status,
            AppError::Downstream(DownstreamError::UpstreamService { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
            AppError::Downstream(DownstreamError::Transport { .. }) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if matches!(self, AppError::Database(_) | AppError::Internal(_)) {
            tracing::error!(error = %self, "request failed");
            return (status, "internal server error").into_response();
        }
        let body = match self {
            AppError::Downstream(DownstreamError::ClientRequest { body, .. })
            | AppError::Downstream(DownstreamError::UpstreamService { body, .. }) => body,
            AppError::Json(rejection) => rejection.body_text(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
