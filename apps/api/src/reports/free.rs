//! Free report flow: validate → render prompt → model → typed report.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{render_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_structured, LanguageModel};
use crate::models::career::{CareerPathInput, CareerPathOutput};
use crate::reports::prompts::{CAREER_COUNSELOR_SYSTEM, FREE_REPORT_PROMPT_TEMPLATE};
use crate::validation::validate;

pub fn build_free_prompt(input: &CareerPathInput) -> String {
    render_template(
        FREE_REPORT_PROMPT_TEMPLATE,
        &[
            ("field_of_study", input.field_of_study.trim()),
            ("career_interests", input.interests().unwrap_or("not specified")),
        ],
    )
}

/// Generates the free report. Invalid input never reaches the model, and a
/// failed or empty model reply yields no report at all.
pub async fn generate_free_report(
    model: &dyn LanguageModel,
    input: CareerPathInput,
) -> Result<CareerPathOutput, AppError> {
    let input = validate(input).map_err(AppError::Validation)?;

    info!(field_of_study = %input.field_of_study, "generating free report");
    let prompt = build_free_prompt(&input);
    let system = format!("{CAREER_COUNSELOR_SYSTEM} {JSON_ONLY_SYSTEM}");

    let report: CareerPathOutput = generate_structured(model, &prompt, &system)
        .await
        .map_err(|e| AppError::Generation(format!("Free report LLM call failed: {e}")))?;

    if report.is_empty() {
        return Err(AppError::Generation(
            "Free report LLM call returned an empty report".to_string(),
        ));
    }

    info!(job_roles = report.job_roles.len(), "free report generated");
    Ok(report)
}
