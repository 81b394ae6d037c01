use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Responses for failures that cross the API boundary. Raw transport
/// errors never reach here; services hand us domain errors with
/// user-readable messages.
#[derive(Debug)]
pub enum APIErrors {
    Unauthorized,
    Forbidden,
    NotFound(&'static str),
    BadRequest(String),
    Conflict(String),
    Internal,
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            APIErrors::Forbidden => (StatusCode::FORBIDDEN, "Permission denied").into_response(),
            APIErrors::NotFound(what) => (StatusCode::NOT_FOUND, what).into_response(),
            APIErrors::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            APIErrors::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
            APIErrors::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
