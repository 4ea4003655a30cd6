// All LLM prompt constants for the Report flows.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Persona for both report flows. Combined with `JSON_ONLY_SYSTEM` at call time.
pub const CAREER_COUNSELOR_SYSTEM: &str = "You are an experienced career counselor who advises \
    university students and recent graduates. You give concrete, current, practical guidance \
    and never invent institutions, certifications or salary figures you are unsure about.";

/// Free report template.
/// Replace: {field_of_study}, {career_interests}
pub const FREE_REPORT_PROMPT_TEMPLATE: &str = r#"Create a beginner-friendly career guidance report for a student.

Field of study: {field_of_study}
Career interests: {career_interests}

Return a JSON object with this EXACT schema (no extra fields):
{
  "jobRoles": ["Junior Data Analyst"],
  "technicalSkills": ["SQL"],
  "softSkills": ["Communication"],
  "toolsAndPlatforms": ["Excel"],
  "courseSuggestions": ["Introduction to Python"],
  "beginnerProjectIdea": "One paragraph describing a small portfolio project."
}

Rules:
- jobRoles: 5 to 8 entry-level roles open to someone with this field of study
- technicalSkills, softSkills, toolsAndPlatforms: 5 to 8 items each
- courseSuggestions: 4 to 6 course titles exactly as the provider names them, without the provider name
- beginnerProjectIdea: a single project a beginner can finish in 2 to 4 weeks
- If no career interests are given, cover a broad range of options"#;

/// Premium report template.
/// Replace: {full_name}, {university}, {field_of_study}, {current_skills},
///          {desired_career_path}, {learning_preference}
pub const PREMIUM_REPORT_PROMPT_TEMPLATE: &str = r#"Create a detailed, personalized career report for this student.

Name: {full_name}
University: {university}
Field of study: {field_of_study}
Current skills: {current_skills}
Desired career path: {desired_career_path}
Learning preference: {learning_preference}

Return a JSON object with this EXACT schema (no extra fields):
{
  "personalizedSummary": "Two or three paragraphs addressed to the student by name.",
  "recommendedRoles": [
    {"title": "Machine Learning Engineer", "description": "...", "whyGoodFit": "..."}
  ],
  "careerRoadmap": [
    {"stage": "Foundation", "duration": "0-3 months", "goals": ["..."], "milestones": ["..."]}
  ],
  "skillGapAnalysis": {
    "existingStrengths": ["..."],
    "skillsToDevelop": ["..."],
    "priorityActions": ["..."]
  },
  "technicalSkills": ["..."],
  "softSkills": ["..."],
  "learningResources": [
    {
      "category": "Programming",
      "resources": [
        {"title": "Introduction to Python", "type": "Course", "urlSuggestion": "coursera.org", "isFree": false}
      ]
    }
  ],
  "certifications": [
    {"name": "AWS Certified Cloud Practitioner", "provider": "Amazon Web Services", "relevance": "..."}
  ],
  "sampleProjects": [
    {"title": "...", "description": "...", "skillsPracticed": ["..."], "difficulty": "Intermediate"}
  ],
  "resumeTips": ["..."],
  "localJobMarketInsights": "Demand, typical entry salaries and hiring hubs in the student's country.",
  "globalJobMarketInsights": "Demand, remote opportunities and trends worldwide."
}

Rules:
- recommendedRoles: 3 to 5 roles, each explaining why it fits THIS student
- careerRoadmap: 3 to 4 stages from where the student is today to a first role
- skillGapAnalysis: compare current skills with what the recommended roles need
- learningResources: 3 to 5 categories, favouring the stated learning preference; resource titles exactly as the provider names them
- certifications: 3 to 5 widely recognised certifications
- sampleProjects: 3 projects of increasing difficulty
- resumeTips: 5 to 7 tips specific to this field
- Where a profile field says "not specified", make reasonable assumptions and say so"#;
