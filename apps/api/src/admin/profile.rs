use tracing::info;

use crate::admin::access::require_admin;
use crate::admin::store::AdminStore;
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileUpdateForm};
use crate::validation::validate;

pub async fn get_own_profile(
    store: &dyn AdminStore,
    session: Option<Identity>,
) -> Result<Profile, AppError> {
    Ok(require_admin(store, session).await?.profile)
}

/// Updates the caller's display name. `role` can never change through here:
/// the form has no such field and the store writes only `full_name`/`updated_at`.
pub async fn update_own_profile(
    store: &dyn AdminStore,
    session: Option<Identity>,
    form: ProfileUpdateForm,
) -> Result<Profile, AppError> {
    let admin = require_admin(store, session).await?;
    let form = validate(ProfileUpdateForm {
        full_name: form.full_name.trim().to_string(),
    })
    .map_err(AppError::Validation)?;

    let profile = store
        .update_profile_name(&admin.identity, &form.full_name)
        .await?;
    info!(user_id = %profile.id, "admin profile updated");
    Ok(profile)
}
