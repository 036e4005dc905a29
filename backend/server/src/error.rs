use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use store::{StoreError, models::ErrorBody};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid {0}: expected a positive integer")]
    InvalidParam(&'static str),

    #[error("Item not found")]
    ItemNotFound,

    #[error("Route Not Found")]
    RouteNotFound,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) | AppError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            AppError::ItemNotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("{self}");
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
