//! "Email my results" stub. Messages are recorded in the log; nothing is sent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

const DEFAULT_SUBJECT: &str = "Your career report";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[validate(email(message = "Please enter a valid email address."))]
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "There is nothing to send."))]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceipt {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Always false: there is no transport.
    pub delivered: bool,
    pub recorded_at: DateTime<Utc>,
}

impl EmailRequest {
    pub fn subject_or_default(&self) -> &str {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn record(&self, email: &EmailRequest) -> Result<NotificationReceipt, AppError>;
}

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn record(&self, email: &EmailRequest) -> Result<NotificationReceipt, AppError> {
        let receipt = NotificationReceipt {
            id: Uuid::new_v4(),
            recipient: email.recipient.clone(),
            subject: email.subject_or_default().to_string(),
            body: email.body.clone(),
            delivered: false,
            recorded_at: Utc::now(),
        };
        info!(
            notification_id = %receipt.id,
            recipient = %receipt.recipient,
            subject = %receipt.subject,
            body_len = receipt.body.len(),
            "email recorded (delivery not implemented)"
        );
        debug!(notification_id = %receipt.id, body = %receipt.body, "recorded email body");
        Ok(receipt)
    }
}
