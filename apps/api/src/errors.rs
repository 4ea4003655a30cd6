use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

use crate::auth::SESSION_COOKIE;
use crate::models::action::ActionResult;
use crate::validation::ValidationIssues;

pub const LOGIN_PATH: &str = "/admin/login";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as a failed [`ActionResult`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationIssues),

    #[error("Report generation failed: {0}")]
    Generation(String),

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ActionResult<()>) {
        match self {
            AppError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                ActionResult::failure("VALIDATION_ERROR", "Invalid input. Please check the form.")
                    .with_issues(issues.messages()),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    ActionResult::failure(
                        "GENERATION_ERROR",
                        "Failed to generate the career report. Please try again.",
                    ),
                )
            }
            AppError::Unauthenticated(msg) => (
                StatusCode::UNAUTHORIZED,
                ActionResult::failure("AUTH_ERROR", msg.clone()).with_redirect(LOGIN_PATH),
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ActionResult::failure("AUTHORIZATION_ERROR", msg.clone())
                    .with_redirect(format!("{LOGIN_PATH}?error=unauthorized_role")),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ActionResult::failure("NOT_FOUND", msg.clone()),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ActionResult::failure("CONFLICT", msg.clone()),
            ),
            AppError::PaymentRequired(msg) => (
                StatusCode::PAYMENT_REQUIRED,
                ActionResult::failure("PAYMENT_REQUIRED", msg.clone()),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                let mut body = ActionResult::failure("DATABASE_ERROR", database_message(e));
                if let Some(details) = database_details(e) {
                    body = body.with_details(details);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ActionResult::failure("INTERNAL_ERROR", "An internal server error occurred"),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        let mut response = (status, Json(body)).into_response();

        // An authenticated non-admin loses the session along with the request.
        if matches!(self, AppError::Forbidden(_)) {
            let expired = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax");
            if let Ok(value) = HeaderValue::from_str(&expired) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }

        response
    }
}

fn database_message(e: &sqlx::Error) -> String {
    match e {
        sqlx::Error::Database(db) => db.message().to_string(),
        sqlx::Error::RowNotFound => "No matching row was found".to_string(),
        other => other.to_string(),
    }
}

/// Extracts the SQLSTATE code and, for Postgres, the server hint.
fn database_details(e: &sqlx::Error) -> Option<serde_json::Value> {
    let db = e.as_database_error()?;
    let hint = db
        .try_downcast_ref::<PgDatabaseError>()
        .and_then(|pg| pg.hint())
        .map(str::to_string);
    Some(json!({
        "code": db.code().map(|c| c.into_owned()),
        "hint": hint,
    }))
}
