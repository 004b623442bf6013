//! Origin allow-list enforcement.
//!
//! Two pieces share one matcher: a `CorsLayer` that answers preflights and
//! stamps response headers for allowed origins, and a request middleware
//! that rejects non-preflight requests from disallowed origins with 403
//! before any other processing. Requests without an `Origin` header
//! (server-to-server, curl) pass through.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::ApiError;
use crate::state::AppState;

/// Whether an `Origin` header value is allowed to call the API.
///
/// Exact matches against the configured list, plus any https origin under
/// the staging domain suffix.
#[must_use]
pub fn origin_allowed(origin: &str, allowed: &[String], staging_suffix: &str) -> bool {
    if allowed.iter().any(|a| a == origin) {
        return true;
    }
    if let Some(host) = origin.strip_prefix("https://") {
        return host.ends_with(staging_suffix) && host.len() > staging_suffix.len();
    }
    false
}

/// Build the CORS layer from the configured allow-list.
#[must_use]
pub fn cors_layer(allowed: Vec<String>, staging_suffix: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .is_ok_and(|o| origin_allowed(o, &allowed, &staging_suffix))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Reject requests from disallowed origins with 403 before any processing.
///
/// Preflights never reach this: the CORS layer answers `OPTIONS` itself.
///
/// # Errors
///
/// Returns [`ApiError::Forbidden`] when the `Origin` header is present and
/// not allow-listed.
pub async fn enforce_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        let config = state.config();
        let allowed = origin.to_str().is_ok_and(|o| {
            origin_allowed(o, &config.allowed_origins, &config.staging_origin_suffix)
        });
        if !allowed {
            tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");
            return Err(ApiError::Forbidden);
        }
    }

    Ok(next.run(request).await)
}
