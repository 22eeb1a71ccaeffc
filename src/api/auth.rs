// src/api/auth.rs

use crate::api::{types::ErrorResponse, ApiState};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

/// Verify the bearer token if one is configured.
pub fn check_auth(
    state: &ApiState,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    let Some(ref expected) = state.token else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");

    if tokens_match(presented.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        tracing::warn!("rejected API request with bad bearer token");
        Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Invalid or missing bearer token".into(),
            }),
        ))
    }
}

/// Length check, then a comparison that looks at every byte.
fn tokens_match(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
