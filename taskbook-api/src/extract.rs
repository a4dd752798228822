/// Request extractors whose rejections use the API error format
///
/// Axum's stock `Json`, `Path` and `Query` reject malformed input with a
/// plain-text body. These wrappers route the rejection through [`ApiError`]
/// so every 4xx carries `{"error", "message"}`.
///
/// ```text
/// GET /tasks/abc  ->  400 {"error": "bad_request", "message": "Invalid URL: ..."}
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query string extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
