use axum::{extract::State, Json};

use crate::admin::access::require_admin;
use crate::admin::dashboards::{AiActivityEntry, AnalyticsSummary, FeedbackEntry, PaymentRecord};
use crate::admin::profile::{get_own_profile, update_own_profile};
use crate::auth::MaybeSession;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::action::ActionResult;
use crate::models::profile::{Profile, ProfileUpdateForm};
use crate::state::AppState;

/// GET /api/v1/admin/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ActionResult<Profile>>, AppError> {
    let profile = get_own_profile(state.store.as_ref(), session).await?;
    Ok(Json(ActionResult::ok("Profile loaded", profile)))
}

/// PATCH /api/v1/admin/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    AppJson(form): AppJson<ProfileUpdateForm>,
) -> Result<Json<ActionResult<Profile>>, AppError> {
    let profile = update_own_profile(state.store.as_ref(), session, form).await?;
    Ok(Json(ActionResult::ok("Profile updated successfully.", profile)))
}

/// GET /api/v1/admin/dashboard/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ActionResult<AnalyticsSummary>>, AppError> {
    require_admin(state.store.as_ref(), session).await?;
    let summary = state.dashboards.analytics.summary().await?;
    Ok(Json(ActionResult::ok("Analytics (sample data)", summary)))
}

/// GET /api/v1/admin/dashboard/payments
pub async fn handle_payments(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ActionResult<Vec<PaymentRecord>>>, AppError> {
    require_admin(state.store.as_ref(), session).await?;
    let payments = state.dashboards.payments.recent_payments().await?;
    Ok(Json(ActionResult::ok("Payments (sample data)", payments)))
}

/// GET /api/v1/admin/dashboard/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ActionResult<Vec<FeedbackEntry>>>, AppError> {
    require_admin(state.store.as_ref(), session).await?;
    let feedback = state.dashboards.feedback.recent_feedback().await?;
    Ok(Json(ActionResult::ok("Feedback (sample data)", feedback)))
}

/// GET /api/v1/admin/dashboard/ai-activity
pub async fn handle_ai_activity(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ActionResult<Vec<AiActivityEntry>>>, AppError> {
    require_admin(state.store.as_ref(), session).await?;
    let activity = state.dashboards.ai_activity.recent_activity().await?;
    Ok(Json(ActionResult::ok("AI activity (sample data)", activity)))
}
