use std::fmt;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{log, log_debug, log_error, log_warn};

pub type ApiResult<T> = Result<T, ApiError>;

/// Classified outcome of a failed request. Mapped to a status code in
/// exactly one place, [`ApiError::status_code`].
#[derive(Debug)]
pub enum ApiError {
    /// Body missing, not UTF-8, not JSON, or not a complete game state.
    BadRequest(String),
    NotFound(String),
    /// The snake controller returned an error or panicked.
    Controller(String),
    /// The snake controller did not answer within the configured limit.
    Timeout(Duration),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Controller(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn report(&self) {
        match self {
            ApiError::NotFound(_) => log_debug!("{}", self),
            ApiError::BadRequest(_) => log!("{}", self),
            ApiError::Timeout(_) => log_warn!("{}", self),
            ApiError::Controller(_) | ApiError::Internal(_) => log_error!("{}", self),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::NotFound(path) => write!(f, "No route for {}", path),
            ApiError::Controller(e) => write!(f, "Snake controller failed: {}", e),
            ApiError::Timeout(limit) => {
                write!(f, "Snake controller did not answer within {} ms", limit.as_millis())
            }
            ApiError::Internal(e) => write!(f, "Internal error while handling request: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<std::str::Utf8Error> for ApiError {
    fn from(e: std::str::Utf8Error) -> Self {
        ApiError::BadRequest(format!("Request body is not valid UTF-8: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.report();
        self.status_code().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest(String::new()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("/x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Controller("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Timeout(Duration::from_millis(5)).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_parse_errors_are_client_errors() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_into_response_uses_mapped_status() {
        let response = ApiError::Timeout(Duration::from_millis(5)).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
