use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;

use crate::api::models::{FailureResponse, Status};

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn failure(status: StatusCode, message: String) -> (StatusCode, Json<FailureResponse>) {
    (
        status,
        Json(FailureResponse {
            error: message,
            status: Status::Failed,
        }),
    )
}
