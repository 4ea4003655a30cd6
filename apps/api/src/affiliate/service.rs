//! Admin operations on affiliate links. Each one passes the admin gate before
//! touching the store.

use tracing::info;
use uuid::Uuid;

use crate::admin::access::require_admin;
use crate::admin::store::AdminStore;
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::affiliate::{AffiliateLink, AffiliateLinkForm};
use crate::validation::validate;

fn duplicate_title(title: &str) -> AppError {
    AppError::Conflict(format!("An affiliate link titled '{title}' already exists."))
}

/// Creates a link. The title pre-check is best effort; the unique index in the
/// database decides races.
pub async fn create_link(
    store: &dyn AdminStore,
    session: Option<Identity>,
    form: AffiliateLinkForm,
) -> Result<AffiliateLink, AppError> {
    let admin = require_admin(store, session).await?;
    let form = validate(form.normalized()).map_err(AppError::Validation)?;

    if store
        .find_link_by_title(&admin.identity, &form.title, None)
        .await?
        .is_some()
    {
        return Err(duplicate_title(&form.title));
    }

    let link = store.insert_link(&admin.identity, &form).await?;
    info!(link_id = %link.id, admin = %admin.identity.user_id, "affiliate link created");
    Ok(link)
}

pub async fn update_link(
    store: &dyn AdminStore,
    session: Option<Identity>,
    id: Uuid,
    form: AffiliateLinkForm,
) -> Result<AffiliateLink, AppError> {
    let admin = require_admin(store, session).await?;
    let form = validate(form.normalized()).map_err(AppError::Validation)?;

    if store
        .find_link_by_title(&admin.identity, &form.title, Some(id))
        .await?
        .is_some()
    {
        return Err(duplicate_title(&form.title));
    }

    let link = store
        .update_link(&admin.identity, id, &form)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Affiliate link {id} not found")))?;
    info!(link_id = %id, admin = %admin.identity.user_id, "affiliate link updated");
    Ok(link)
}

pub async fn delete_link(
    store: &dyn AdminStore,
    session: Option<Identity>,
    id: Uuid,
) -> Result<(), AppError> {
    let admin = require_admin(store, session).await?;

    if !store.delete_link(&admin.identity, id).await? {
        return Err(AppError::NotFound(format!("Affiliate link {id} not found")));
    }
    info!(link_id = %id, admin = %admin.identity.user_id, "affiliate link deleted");
    Ok(())
}
