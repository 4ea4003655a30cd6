//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::affiliate::directory::{load_directory, LinkedCourse};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::action::ActionResult;
use crate::models::career::{CareerPathInput, CareerPathOutput};
use crate::models::premium::PremiumCareerPathOutput;
use crate::notify::{EmailRequest, NotificationReceipt};
use crate::reports::free::generate_free_report;
use crate::reports::premium::{generate_premium_report, PremiumReportRequest};
use crate::state::AppState;
use crate::validation::validate;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FreeReportView {
    pub report: CareerPathOutput,
    /// Every course suggestion, with its affiliate link when one matches.
    pub courses: Vec<LinkedCourse>,
}

#[derive(Debug, Serialize)]
pub struct PremiumReportView {
    pub report: PremiumCareerPathOutput,
    /// Every learning resource title, with its affiliate link when one matches.
    pub resources: Vec<LinkedCourse>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports/free
pub async fn handle_free_report(
    State(state): State<AppState>,
    AppJson(input): AppJson<CareerPathInput>,
) -> Result<Json<ActionResult<FreeReportView>>, AppError> {
    let report = generate_free_report(state.llm.as_ref(), input).await?;

    let directory = load_directory(state.store.as_ref()).await;
    let courses = directory.link_titles(report.course_suggestions.iter().map(String::as_str));

    Ok(Json(ActionResult::ok(
        "Career report generated successfully.",
        FreeReportView { report, courses },
    )))
}

/// POST /api/v1/reports/premium
pub async fn handle_premium_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<PremiumReportRequest>,
) -> Result<Json<ActionResult<PremiumReportView>>, AppError> {
    let report =
        generate_premium_report(state.llm.as_ref(), state.payments.as_ref(), request).await?;

    let directory = load_directory(state.store.as_ref()).await;
    let resources = directory.link_titles(report.resources().map(|r| r.title.as_str()));

    Ok(Json(ActionResult::ok(
        "Premium career report generated successfully.",
        PremiumReportView { report, resources },
    )))
}

/// POST /api/v1/reports/email
pub async fn handle_email_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<EmailRequest>,
) -> Result<Json<ActionResult<NotificationReceipt>>, AppError> {
    let request = validate(request).map_err(AppError::Validation)?;
    let receipt = state.notifier.record(&request).await?;
    Ok(Json(ActionResult::ok(
        format!(
            "Email delivery is simulated; your report for {} was recorded.",
            receipt.recipient
        ),
        receipt,
    )))
}
