use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-tier report request. Lives only for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathInput {
    #[validate(length(min = 3, message = "Field of study must be at least 3 characters."))]
    pub field_of_study: String,
    #[serde(default)]
    pub career_interests: Option<String>,
}

impl CareerPathInput {
    /// Interests with surrounding whitespace removed; blank counts as absent.
    pub fn interests(&self) -> Option<&str> {
        self.career_interests
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The free report. All six fields are required in the model's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathOutput {
    pub job_roles: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools_and_platforms: Vec<String>,
    pub course_suggestions: Vec<String>,
    pub beginner_project_idea: String,
}

impl CareerPathOutput {
    /// True when the model answered with the right shape but no content.
    pub fn is_empty(&self) -> bool {
        self.job_roles.is_empty()
            && self.technical_skills.is_empty()
            && self.soft_skills.is_empty()
            && self.tools_and_platforms.is_empty()
            && self.course_suggestions.is_empty()
            && self.beginner_project_idea.trim().is_empty()
    }
}
