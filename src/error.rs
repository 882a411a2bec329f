use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Could not fetch Wikipedia page for '{0}'")]
    FetchFailure(String),

    #[error("No headings found for '{0}'")]
    NoHeadings(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Pipeline failures are reported in the body, not the status line.
        let status = match self {
            AppError::FetchFailure(_) | AppError::NoHeadings(_) => StatusCode::OK,
            AppError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        response::failure(status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
