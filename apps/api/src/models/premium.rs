use serde::{Deserialize, Serialize};
use validator::Validate;

/// Paid-tier report request. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PremiumCareerPathInput {
    #[validate(length(min = 2, message = "Full name must be at least 2 characters."))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 2, message = "University name must be at least 2 characters."))]
    pub university: String,
    #[validate(length(min = 3, message = "Field of study must be at least 3 characters."))]
    pub field_of_study: String,
    #[serde(default)]
    pub current_skills: Option<String>,
    #[serde(default)]
    pub desired_career_path: Option<String>,
    #[validate(length(min = 1, message = "Please select a learning preference."))]
    pub learning_preference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedRole {
    pub title: String,
    pub description: String,
    pub why_good_fit: String,
}

/// One stage of the multi-stage roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStage {
    pub stage: String,
    pub duration: String,
    pub goals: Vec<String>,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub existing_strengths: Vec<String>,
    pub skills_to_develop: Vec<String>,
    pub priority_actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url_suggestion: String,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCategory {
    pub category: String,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub provider: String,
    pub relevance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleProject {
    pub title: String,
    pub description: String,
    pub skills_practiced: Vec<String>,
    pub difficulty: String,
}

/// The twelve-section premium report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumCareerPathOutput {
    pub personalized_summary: String,
    pub recommended_roles: Vec<RecommendedRole>,
    pub career_roadmap: Vec<RoadmapStage>,
    pub skill_gap_analysis: SkillGapAnalysis,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub learning_resources: Vec<ResourceCategory>,
    pub certifications: Vec<Certification>,
    pub sample_projects: Vec<SampleProject>,
    pub resume_tips: Vec<String>,
    pub local_job_market_insights: String,
    pub global_job_market_insights: String,
}

impl PremiumCareerPathOutput {
    pub fn is_empty(&self) -> bool {
        self.personalized_summary.trim().is_empty()
            && self.recommended_roles.is_empty()
            && self.career_roadmap.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = &LearningResource> {
        self.learning_resources
            .iter()
            .flat_map(|category| category.resources.iter())
    }
}
