use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Acknowledgement envelope returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessfulResponse {
    pub success: bool,
    #[serde(skip)]
    pub status: StatusCode,
}

impl SuccessfulResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            success: true,
            status,
        }
    }

    pub fn created() -> Self {
        Self::new(StatusCode::CREATED)
    }
}

impl Default for SuccessfulResponse {
    fn default() -> Self {
        Self::new(StatusCode::OK)
    }
}

impl IntoResponse for SuccessfulResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
