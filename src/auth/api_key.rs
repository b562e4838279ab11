use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use constant_time_eq::constant_time_eq;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::server::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Constant-time comparison against the configured key.
pub fn verify_api_key(candidate: &str, expected: &str) -> bool {
    constant_time_eq(candidate.as_bytes(), expected.as_bytes())
}

/// Middleware guarding mutating routes: requests must carry the configured
/// key in the `x-api-key` header.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if verify_api_key(key, &state.api_key) => Ok(next.run(request).await),
        Some(_) => {
            warn!("Rejected request with invalid API key");
            Err(ApiError::Unauthorized("Invalid API key".to_string()))
        }
        None => Err(ApiError::Unauthorized("Missing API key".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_key_verifies() {
        assert!(verify_api_key("champions-key", "champions-key"));
        assert!(!verify_api_key("champions-key2", "champions-key"));
        assert!(!verify_api_key("", "champions-key"));
    }
}
