//! Admin gate in front of every admin read and write.
//!
//! Order is fixed and all-or-nothing: session → profile → role. Any failure
//! returns before the store is asked to write anything. The database's RLS
//! policies remain the real backstop; this check only fails fast.

use tracing::warn;

use crate::admin::store::AdminStore;
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::profile::Profile;

/// A caller that passed the gate.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub identity: Identity,
    pub profile: Profile,
}

pub async fn require_admin(
    store: &dyn AdminStore,
    session: Option<Identity>,
) -> Result<AdminContext, AppError> {
    let identity = session.ok_or_else(|| {
        AppError::Unauthenticated("Please log in to access the admin panel.".to_string())
    })?;

    let profile = match store.fetch_profile(&identity).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            warn!(user_id = %identity.user_id, "no profile for session identity");
            return Err(AppError::Unauthenticated(
                "Could not load your profile. Please log in again.".to_string(),
            ));
        }
        Err(e) => {
            warn!(user_id = %identity.user_id, error = %e, "profile lookup failed");
            return Err(AppError::Unauthenticated(
                "Could not load your profile. Please log in again.".to_string(),
            ));
        }
    };

    if !profile.is_admin() {
        warn!(user_id = %identity.user_id, role = %profile.role, "non-admin attempted admin action");
        return Err(AppError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        ));
    }

    Ok(AdminContext { identity, profile })
}
