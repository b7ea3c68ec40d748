//! Request extractors whose rejections render as [`AppError`] envelopes.

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    FromRequest, FromRequestParts,
};

use crate::error::AppError;

/// JSON request body. Unparseable or mistyped bodies and a missing
/// `Content-Type` become `400 bad_request`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters. Values that fail to parse become `400 bad_request`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        // Route and handler disagree on the captures
        if rejection.status().is_server_error() {
            AppError::Internal(anyhow::anyhow!(rejection.body_text()))
        } else {
            AppError::bad_request(rejection.body_text())
        }
    }
}
