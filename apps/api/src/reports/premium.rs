//! Premium report flow.
//!
//! Flow: validate → verify payment with the gateway → render prompt →
//!       model → typed twelve-section report.
//!
//! Payment is checked server-side before the model is called; a client-side
//! "payment succeeded" signal alone never unlocks the report.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{render_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_structured, LanguageModel};
use crate::models::premium::{PremiumCareerPathInput, PremiumCareerPathOutput};
use crate::payments::{PaymentProof, PaymentVerifier};
use crate::reports::prompts::{CAREER_COUNSELOR_SYSTEM, PREMIUM_REPORT_PROMPT_TEMPLATE};
use crate::validation::validate;

#[derive(Debug, Clone, Deserialize)]
pub struct PremiumReportRequest {
    pub input: PremiumCareerPathInput,
    pub payment: PaymentProof,
}

fn or_unspecified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("not specified")
}

pub fn build_premium_prompt(input: &PremiumCareerPathInput) -> String {
    render_template(
        PREMIUM_REPORT_PROMPT_TEMPLATE,
        &[
            ("full_name", input.full_name.trim()),
            ("university", input.university.trim()),
            ("field_of_study", input.field_of_study.trim()),
            ("current_skills", or_unspecified(&input.current_skills)),
            ("desired_career_path", or_unspecified(&input.desired_career_path)),
            ("learning_preference", input.learning_preference.trim()),
        ],
    )
}

pub async fn generate_premium_report(
    model: &dyn LanguageModel,
    payments: &dyn PaymentVerifier,
    request: PremiumReportRequest,
) -> Result<PremiumCareerPathOutput, AppError> {
    let input = validate(request.input).map_err(AppError::Validation)?;

    let verified = payments.verify(&request.payment).await?;
    info!(
        payment_id = %verified.payment_id,
        field_of_study = %input.field_of_study,
        "payment verified; generating premium report"
    );

    let prompt = build_premium_prompt(&input);
    let system = format!("{CAREER_COUNSELOR_SYSTEM} {JSON_ONLY_SYSTEM}");

    let report: PremiumCareerPathOutput = generate_structured(model, &prompt, &system)
        .await
        .map_err(|e| AppError::Generation(format!("Premium report LLM call failed: {e}")))?;

    if report.is_empty() {
        return Err(AppError::Generation(
            "Premium report LLM call returned an empty report".to_string(),
        ));
    }

    info!(
        payment_id = %verified.payment_id,
        roadmap_stages = report.career_roadmap.len(),
        "premium report generated"
    );
    Ok(report)
}
