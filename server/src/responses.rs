use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use common::{Color, Direction};
use serde::Serialize;

use crate::api_error::{ApiError, ApiResult};

const PIXEL: &str = "pixel";

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub color: Color,
    pub headtype: &'static str,
    pub tailtype: &'static str,
}

impl StartResponse {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            headtype: PIXEL,
            tailtype: PIXEL,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: Direction,
}

impl MoveResponse {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

/// 200 reply with a JSON payload and an exact content length.
pub fn json_reply<T: Serialize>(value: &T) -> ApiResult<Response> {
    let payload = serde_json::to_vec(value)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize reply: {}", e)))?;

    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static("application/json")),
        (CONTENT_LENGTH, HeaderValue::from(payload.len())),
    ];
    Ok((StatusCode::OK, headers, payload).into_response())
}
