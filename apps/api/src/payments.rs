//! Server-side payment verification for premium reports.
//!
//! The checkout widget only tells the browser that a payment succeeded. Before
//! any paid content is generated the payment id is looked up with the gateway
//! and checked for status, amount and currency.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PaymentConfig;
use crate::errors::AppError;

/// What the client reports after checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    pub payment_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedPayment {
    pub payment_id: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment verification is not configured")]
    NotConfigured,

    #[error("payment rejected: {0}")]
    Rejected(String),

    #[error("payment gateway error (status {status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotConfigured => AppError::PaymentRequired(
                "Premium reports are unavailable because payment verification is not configured."
                    .to_string(),
            ),
            PaymentError::Rejected(reason) => AppError::PaymentRequired(reason),
            PaymentError::Gateway { status: 404, .. } => {
                AppError::PaymentRequired("Payment not found.".to_string())
            }
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}

#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(&self, proof: &PaymentProof) -> Result<VerifiedPayment, PaymentError>;
}

/// Refuses every payment. Used when no gateway credentials are configured.
pub struct UnconfiguredVerifier;

#[async_trait]
impl PaymentVerifier for UnconfiguredVerifier {
    async fn verify(&self, _proof: &PaymentProof) -> Result<VerifiedPayment, PaymentError> {
        Err(PaymentError::NotConfigured)
    }
}

/// Payment as returned by the gateway's `GET /payments/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayPayment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Verifies payments against a Razorpay-compatible REST API.
pub struct GatewayVerifier {
    client: Client,
    key_id: String,
    key_secret: String,
    api_base: String,
    expected_amount_minor: i64,
    currency: String,
}

impl GatewayVerifier {
    pub fn new(
        key_id: String,
        key_secret: String,
        config: &PaymentConfig,
    ) -> Result<Self, PaymentError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()?,
            key_id,
            key_secret,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            expected_amount_minor: config.premium_price_minor,
            currency: config.currency.clone(),
        })
    }
}

#[async_trait]
impl PaymentVerifier for GatewayVerifier {
    async fn verify(&self, proof: &PaymentProof) -> Result<VerifiedPayment, PaymentError> {
        check_payment_id(&proof.payment_id)?;

        let response = self
            .client
            .get(format!("{}/payments/{}", self.api_base, proof.payment_id))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        let payment: GatewayPayment = response.json().await?;
        check_payment(&payment, proof, self.expected_amount_minor, &self.currency)
    }
}

/// Builds the verifier for the configured gateway, or one that refuses everything.
pub fn verifier_from_config(config: &PaymentConfig) -> Result<Arc<dyn PaymentVerifier>, PaymentError> {
    match &config.credentials {
        Some((key_id, key_secret)) => Ok(Arc::new(GatewayVerifier::new(
            key_id.clone(),
            key_secret.clone(),
            config,
        )?)),
        None => {
            warn!("payment credentials not set; premium reports will be refused");
            Ok(Arc::new(UnconfiguredVerifier))
        }
    }
}

fn check_payment_id(payment_id: &str) -> Result<(), PaymentError> {
    let well_formed = !payment_id.is_empty()
        && payment_id.len() <= 64
        && payment_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if well_formed {
        Ok(())
    } else {
        Err(PaymentError::Rejected("Malformed payment id.".to_string()))
    }
}

/// Decides whether a gateway payment pays for one premium report.
pub fn check_payment(
    payment: &GatewayPayment,
    proof: &PaymentProof,
    expected_amount_minor: i64,
    currency: &str,
) -> Result<VerifiedPayment, PaymentError> {
    if payment.id != proof.payment_id {
        return Err(PaymentError::Rejected("Payment id mismatch.".to_string()));
    }
    if payment.status != "captured" {
        return Err(PaymentError::Rejected(format!(
            "Payment is '{}', not captured.",
            payment.status
        )));
    }
    if !payment.currency.eq_ignore_ascii_case(currency) || payment.amount < expected_amount_minor {
        return Err(PaymentError::Rejected(format!(
            "Payment of {} {} does not cover the premium report.",
            payment.amount, payment.currency
        )));
    }
    if let Some(order_id) = &proof.order_id {
        if payment.order_id.as_deref() != Some(order_id.as_str()) {
            return Err(PaymentError::Rejected("Payment does not belong to this order.".to_string()));
        }
    }

    info!(payment_id = %payment.id, amount = payment.amount, "payment verified");
    Ok(VerifiedPayment {
        payment_id: payment.id.clone(),
        amount_minor: payment.amount,
        currency: payment.currency.clone(),
    })
}
