use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct OutlineQuery {
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub country: String,
    pub outline: String,
    pub heading_count: usize,
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub error: String,
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
    pub usage: &'static str,
    pub example: &'static str,
}
