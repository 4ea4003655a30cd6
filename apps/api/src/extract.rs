//! Request extractors whose rejections render as `AppError`.
//!
//! axum's own `Json`, `Path` and `Query` reject with plain text. These
//! wrappers run the same extraction and turn a failure into a validation
//! error, so a malformed request gets the usual action-result body.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts},
};

use crate::errors::AppError;
use crate::validation::ValidationIssues;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

fn malformed(detail: String) -> AppError {
    AppError::Validation(ValidationIssues::from_messages(vec![detail]))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        malformed(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        malformed(rejection.body_text())
    }
}
