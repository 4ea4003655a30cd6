use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "affiliateUrl")]
    pub affiliate_url: String,
    #[sqlx(rename = "displayText")]
    pub display_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AffiliateLink {
    /// Text to show in place of the course name.
    pub fn label(&self) -> &str {
        self.display_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

/// Admin form for creating or editing a link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLinkForm {
    #[validate(length(min = 3, message = "Title must be at least 3 characters."))]
    pub title: String,
    #[validate(url(message = "Please enter a valid URL."))]
    pub affiliate_url: String,
    #[serde(default)]
    pub display_text: Option<String>,
}

impl AffiliateLinkForm {
    /// Trims the title and drops a blank display text before persisting.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            affiliate_url: self.affiliate_url.trim().to_string(),
            display_text: self
                .display_text
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
