//! Admin dashboard data sources.
//!
//! Each panel reads from its own trait so a real aggregation backend can be
//! swapped in at startup without touching handlers. The `Sample*` sources
//! serve fixed demonstration data; nothing here is computed from live traffic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Panel data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReports {
    pub date: NaiveDate,
    pub free_reports: u32,
    pub premium_reports: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPopularity {
    pub field_of_study: String,
    pub reports: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_users: u32,
    pub total_reports: u32,
    pub premium_conversion_rate: f32,
    pub daily: Vec<DailyReports>,
    pub top_fields: Vec<FieldPopularity>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Captured,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub customer_email: String,
    pub amount_minor: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: u32,
    pub user_name: String,
    /// 1 – 5
    pub rating: u8,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiActivityEntry {
    pub id: u32,
    /// "free" | "premium"
    pub flow: String,
    pub field_of_study: String,
    pub succeeded: bool,
    pub latency_ms: u64,
    pub at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Source traits
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn summary(&self) -> Result<AnalyticsSummary, AppError>;
}

#[async_trait]
pub trait PaymentsSource: Send + Sync {
    async fn recent_payments(&self) -> Result<Vec<PaymentRecord>, AppError>;
}

#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn recent_feedback(&self) -> Result<Vec<FeedbackEntry>, AppError>;
}

#[async_trait]
pub trait AiActivitySource: Send + Sync {
    async fn recent_activity(&self) -> Result<Vec<AiActivityEntry>, AppError>;
}

/// The four panel sources, carried in `AppState`.
#[derive(Clone)]
pub struct Dashboards {
    pub analytics: Arc<dyn AnalyticsSource>,
    pub payments: Arc<dyn PaymentsSource>,
    pub feedback: Arc<dyn FeedbackSource>,
    pub ai_activity: Arc<dyn AiActivitySource>,
}

impl Dashboards {
    pub fn sample() -> Self {
        Self {
            analytics: Arc::new(SampleAnalytics),
            payments: Arc::new(SamplePayments),
            feedback: Arc::new(SampleFeedback),
            ai_activity: Arc::new(SampleAiActivity),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sample sources
// ────────────────────────────────────────────────────────────────────────────

/// Fixed anchor so sample data is stable across calls.
fn sample_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub struct SampleAnalytics;

#[async_trait]
impl AnalyticsSource for SampleAnalytics {
    async fn summary(&self) -> Result<AnalyticsSummary, AppError> {
        let start = sample_anchor().date_naive();
        let daily: Vec<DailyReports> = [(42, 3), (51, 5), (38, 2), (64, 7), (57, 4), (70, 9), (49, 6)]
            .into_iter()
            .enumerate()
            .map(|(i, (free, premium))| DailyReports {
                date: start + Duration::days(i as i64),
                free_reports: free,
                premium_reports: premium,
            })
            .collect();

        let total_reports: u32 = daily.iter().map(|d| d.free_reports + d.premium_reports).sum();
        let premium: u32 = daily.iter().map(|d| d.premium_reports).sum();

        Ok(AnalyticsSummary {
            total_users: 1_284,
            total_reports,
            premium_conversion_rate: premium as f32 / total_reports as f32,
            daily,
            top_fields: vec![
                FieldPopularity {
                    field_of_study: "Computer Science".to_string(),
                    reports: 142,
                },
                FieldPopularity {
                    field_of_study: "Mechanical Engineering".to_string(),
                    reports: 67,
                },
                FieldPopularity {
                    field_of_study: "Business Administration".to_string(),
                    reports: 54,
                },
            ],
        })
    }
}

pub struct SamplePayments;

#[async_trait]
impl PaymentsSource for SamplePayments {
    async fn recent_payments(&self) -> Result<Vec<PaymentRecord>, AppError> {
        let at = sample_anchor();
        Ok(vec![
            PaymentRecord {
                id: "pay_sample001".to_string(),
                customer_email: "aarav@example.com".to_string(),
                amount_minor: 49_900,
                currency: "INR".to_string(),
                status: PaymentStatus::Captured,
                created_at: at,
            },
            PaymentRecord {
                id: "pay_sample002".to_string(),
                customer_email: "meera@example.com".to_string(),
                amount_minor: 49_900,
                currency: "INR".to_string(),
                status: PaymentStatus::Failed,
                created_at: at + Duration::hours(3),
            },
            PaymentRecord {
                id: "pay_sample003".to_string(),
                customer_email: "john@example.com".to_string(),
                amount_minor: 49_900,
                currency: "INR".to_string(),
                status: PaymentStatus::Refunded,
                created_at: at + Duration::days(1),
            },
        ])
    }
}

pub struct SampleFeedback;

#[async_trait]
impl FeedbackSource for SampleFeedback {
    async fn recent_feedback(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        let at = sample_anchor();
        Ok(vec![
            FeedbackEntry {
                id: 1,
                user_name: "Ananya".to_string(),
                rating: 5,
                comment: "The roadmap was exactly what I needed for my final year.".to_string(),
                submitted_at: at,
            },
            FeedbackEntry {
                id: 2,
                user_name: "Rahul".to_string(),
                rating: 4,
                comment: "Great course list. Would like more free resources.".to_string(),
                submitted_at: at + Duration::hours(5),
            },
            FeedbackEntry {
                id: 3,
                user_name: "Sara".to_string(),
                rating: 3,
                comment: "Job roles were useful but the project idea felt generic.".to_string(),
                submitted_at: at + Duration::days(2),
            },
        ])
    }
}

pub struct SampleAiActivity;

#[async_trait]
impl AiActivitySource for SampleAiActivity {
    async fn recent_activity(&self) -> Result<Vec<AiActivityEntry>, AppError> {
        let at = sample_anchor();
        Ok(vec![
            AiActivityEntry {
                id: 1,
                flow: "free".to_string(),
                field_of_study: "Computer Science".to_string(),
                succeeded: true,
                latency_ms: 4_210,
                at,
            },
            AiActivityEntry {
                id: 2,
                flow: "premium".to_string(),
                field_of_study: "Biotechnology".to_string(),
                succeeded: true,
                latency_ms: 17_830,
                at: at + Duration::minutes(12),
            },
            AiActivityEntry {
                id: 3,
                flow: "free".to_string(),
                field_of_study: "History".to_string(),
                succeeded: false,
                latency_ms: 30_002,
                at: at + Duration::minutes(40),
            },
        ])
    }
}
