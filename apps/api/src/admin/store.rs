//! Persistence for admin-managed data: profiles and affiliate links.
//!
//! `AdminStore` is the seam between the access layer and the hosted database.
//! `PgAdminStore` talks to Postgres; every actor-scoped statement runs in a
//! transaction that carries the caller's session claims so the database's own
//! row-level security policies see the same identity.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::affiliate::{AffiliateLink, AffiliateLinkForm};
use crate::models::profile::Profile;

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn fetch_profile(&self, actor: &Identity) -> Result<Option<Profile>, AppError>;

    /// Sets `full_name` and `updated_at` on the actor's own profile. No other
    /// column is written.
    async fn update_profile_name(
        &self,
        actor: &Identity,
        full_name: &str,
    ) -> Result<Profile, AppError>;

    /// Public read path used at report-render time.
    async fn list_links(&self) -> Result<Vec<AffiliateLink>, AppError>;

    /// Case-insensitive, whitespace-trimmed title match, optionally ignoring one id.
    async fn find_link_by_title(
        &self,
        actor: &Identity,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<AffiliateLink>, AppError>;

    async fn insert_link(
        &self,
        actor: &Identity,
        form: &AffiliateLinkForm,
    ) -> Result<AffiliateLink, AppError>;

    async fn update_link(
        &self,
        actor: &Identity,
        id: Uuid,
        form: &AffiliateLinkForm,
    ) -> Result<Option<AffiliateLink>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_link(&self, actor: &Identity, id: Uuid) -> Result<bool, AppError>;
}

const LINK_COLUMNS: &str = r#"id, title, "affiliateUrl", "displayText", created_at"#;
const PROFILE_COLUMNS: &str = "id, full_name, role, updated_at";

pub struct PgAdminStore {
    pool: PgPool,
    rls_role: Option<String>,
}

impl PgAdminStore {
    pub fn new(pool: PgPool, rls_role: Option<String>) -> Self {
        Self { pool, rls_role }
    }

    /// Opens a transaction that publishes the actor's claims and, when
    /// configured, drops to the RLS role for the rest of the transaction.
    async fn begin_scoped(&self, actor: &Identity) -> Result<Transaction<'_, Postgres>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
            .bind(actor.claims_json())
            .execute(&mut *tx)
            .await?;

        if let Some(role) = &self.rls_role {
            sqlx::query("SELECT set_config('role', $1, true)")
                .bind(role)
                .execute(&mut *tx)
                .await?;
        }

        Ok(tx)
    }
}

fn conflict_on_unique(e: sqlx::Error, title: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("An affiliate link titled '{title}' already exists."))
        }
        _ => AppError::Database(e),
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn fetch_profile(&self, actor: &Identity) -> Result<Option<Profile>, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(actor.user_id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn update_profile_name(
        &self,
        actor: &Identity,
        full_name: &str,
    ) -> Result<Profile, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = $1, updated_at = now()
            WHERE id = $2
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(full_name)
        .bind(actor.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", actor.user_id)))?;
        tx.commit().await?;
        Ok(profile)
    }

    async fn list_links(&self) -> Result<Vec<AffiliateLink>, AppError> {
        let links = sqlx::query_as::<_, AffiliateLink>(&format!(
            "SELECT {LINK_COLUMNS} FROM affiliate_links ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    async fn find_link_by_title(
        &self,
        actor: &Identity,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<AffiliateLink>, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let link = sqlx::query_as::<_, AffiliateLink>(&format!(
            r#"
            SELECT {LINK_COLUMNS} FROM affiliate_links
            WHERE lower(trim(title)) = lower(trim($1))
              AND ($2::uuid IS NULL OR id <> $2)
            LIMIT 1
            "#
        ))
        .bind(title)
        .bind(exclude)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(link)
    }

    async fn insert_link(
        &self,
        actor: &Identity,
        form: &AffiliateLinkForm,
    ) -> Result<AffiliateLink, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let link = sqlx::query_as::<_, AffiliateLink>(&format!(
            r#"
            INSERT INTO affiliate_links (title, "affiliateUrl", "displayText")
            VALUES ($1, $2, $3)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&form.title)
        .bind(&form.affiliate_url)
        .bind(&form.display_text)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, &form.title))?;
        tx.commit().await?;
        Ok(link)
    }

    async fn update_link(
        &self,
        actor: &Identity,
        id: Uuid,
        form: &AffiliateLinkForm,
    ) -> Result<Option<AffiliateLink>, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let link = sqlx::query_as::<_, AffiliateLink>(&format!(
            r#"
            UPDATE affiliate_links
            SET title = $1, "affiliateUrl" = $2, "displayText" = $3
            WHERE id = $4
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&form.title)
        .bind(&form.affiliate_url)
        .bind(&form.display_text)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, &form.title))?;
        tx.commit().await?;
        Ok(link)
    }

    async fn delete_link(&self, actor: &Identity, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.begin_scoped(actor).await?;
        let result = sqlx::query("DELETE FROM affiliate_links WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
