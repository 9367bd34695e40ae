use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

use crate::modules::time_tracking::core::decision::ErrorKind;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::StateConflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let body = ErrorBody {
            error: kind.as_str(),
            message: self.to_string(),
        };
        (status_for(kind), Json(body)).into_response()
    }
}
