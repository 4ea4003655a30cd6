use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::affiliate::directory::load_directory;
use crate::affiliate::service;
use crate::auth::MaybeSession;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::action::ActionResult;
use crate::models::affiliate::{AffiliateLink, AffiliateLinkForm};
use crate::state::AppState;
use crate::validation::ValidationIssues;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub title: String,
}

/// GET /api/v1/affiliate-links
pub async fn handle_list_links(
    State(state): State<AppState>,
) -> Result<Json<ActionResult<Vec<AffiliateLink>>>, AppError> {
    let links = state.store.list_links().await?;
    Ok(Json(ActionResult::ok(
        format!("{} affiliate links", links.len()),
        links,
    )))
}

/// GET /api/v1/affiliate-links/lookup?title=
pub async fn handle_lookup_link(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LookupQuery>,
) -> Result<Json<ActionResult<Option<AffiliateLink>>>, AppError> {
    if query.title.trim().is_empty() {
        return Err(AppError::Validation(ValidationIssues::from_messages(vec![
            "A course title is required.".to_string(),
        ])));
    }

    let directory = load_directory(state.store.as_ref()).await;
    let link = directory.lookup(&query.title).cloned();
    let message = if link.is_some() {
        "Affiliate link found"
    } else {
        "No affiliate link for this title"
    };
    Ok(Json(ActionResult::ok(message, link)))
}

/// POST /api/v1/admin/affiliate-links
pub async fn handle_create_link(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    AppJson(form): AppJson<AffiliateLinkForm>,
) -> Result<Json<ActionResult<AffiliateLink>>, AppError> {
    let link = service::create_link(state.store.as_ref(), session, form).await?;
    Ok(Json(ActionResult::ok("Affiliate link created successfully.", link)))
}

/// PUT /api/v1/admin/affiliate-links/:id
pub async fn handle_update_link(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    AppPath(id): AppPath<Uuid>,
    AppJson(form): AppJson<AffiliateLinkForm>,
) -> Result<Json<ActionResult<AffiliateLink>>, AppError> {
    let link = service::update_link(state.store.as_ref(), session, id, form).await?;
    Ok(Json(ActionResult::ok("Affiliate link updated successfully.", link)))
}

/// DELETE /api/v1/admin/affiliate-links/:id
pub async fn handle_delete_link(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ActionResult<Uuid>>, AppError> {
    service::delete_link(state.store.as_ref(), session, id).await?;
    Ok(Json(ActionResult::ok("Affiliate link deleted successfully.", id)))
}
