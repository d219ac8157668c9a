use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Job source error: {0}")]
    Source(#[from] feed::FeedError),

    #[error("Job not found: {0}")]
    UnknownCard(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = match self {
            BoardError::UnknownCard(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
