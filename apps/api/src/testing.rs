//! In-memory doubles shared by the unit and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::admin::dashboards::Dashboards;
use crate::admin::store::AdminStore;
use crate::affiliate::directory::normalize_title;
use crate::auth::{Identity, SessionClaims, SessionVerifier};
use crate::config::SessionConfig;
use crate::errors::AppError;
use crate::llm_client::{LanguageModel, LlmError};
use crate::models::affiliate::{AffiliateLink, AffiliateLinkForm};
use crate::models::profile::Profile;
use crate::notify::{EmailRequest, NotificationReceipt, Notifier};
use crate::payments::{PaymentError, PaymentProof, PaymentVerifier, VerifiedPayment};
use crate::routes::build_router;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

pub const TEST_JWT_SECRET: &str = "test-session-secret";

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        audience: "authenticated".to_string(),
    }
}

/// Signs a session token the way the hosted auth service does.
pub fn mint_token(secret: &str, user_id: Uuid, exp_offset_secs: i64) -> String {
    let exp = Utc::now().timestamp() + exp_offset_secs;
    let claims = json!({
        "sub": user_id,
        "exp": exp.max(0),
        "email": "user@example.com",
        "role": "authenticated",
        "aud": "authenticated",
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn identity_for(user_id: Uuid) -> Identity {
    Identity::from_claims(SessionClaims {
        sub: user_id,
        exp: (Utc::now().timestamp() + 3600) as usize,
        email: Some("user@example.com".to_string()),
        extra: Map::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Language model
// ────────────────────────────────────────────────────────────────────────────

/// Returns the same reply (or failure) for every prompt and records each call.
pub struct ScriptedModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        })
    }
}

pub fn sample_free_output() -> Value {
    json!({
        "jobRoles": ["Software Engineer", "Data Analyst", "DevOps Engineer"],
        "technicalSkills": ["Python", "SQL", "Git"],
        "softSkills": ["Communication", "Problem solving"],
        "toolsAndPlatforms": ["VS Code", "GitHub", "Docker"],
        "courseSuggestions": ["Introduction to Python", "SQL for Data Analysis"],
        "beginnerProjectIdea": "Build a personal expense tracker with a small REST API."
    })
}

pub fn sample_premium_output() -> Value {
    json!({
        "personalizedSummary": "Priya, your electrical engineering background suits embedded ML.",
        "recommendedRoles": [{
            "title": "Embedded ML Engineer",
            "description": "Deploys models on microcontrollers.",
            "whyGoodFit": "Combines circuits knowledge with Python."
        }],
        "careerRoadmap": [
            {
                "stage": "Foundations",
                "duration": "0-3 months",
                "goals": ["Learn Python data tooling"],
                "milestones": ["Finish one ML course"]
            },
            {
                "stage": "Specialization",
                "duration": "3-9 months",
                "goals": ["Deploy a model to an MCU"],
                "milestones": ["Publish a TinyML project"]
            }
        ],
        "skillGapAnalysis": {
            "existingStrengths": ["MATLAB", "Signals"],
            "skillsToDevelop": ["PyTorch"],
            "priorityActions": ["Take a machine learning course"]
        },
        "technicalSkills": ["Python", "PyTorch", "C"],
        "softSkills": ["Technical writing"],
        "learningResources": [{
            "category": "Courses",
            "resources": [
                {
                    "title": "Machine Learning",
                    "type": "Course",
                    "urlSuggestion": "coursera.org",
                    "isFree": false
                },
                {
                    "title": "TinyML Handbook",
                    "type": "Book",
                    "urlSuggestion": "tinyml.org",
                    "isFree": true
                }
            ]
        }],
        "certifications": [{
            "name": "TensorFlow Developer",
            "provider": "Google",
            "relevance": "Validates model-building skills."
        }],
        "sampleProjects": [{
            "title": "Keyword spotter",
            "description": "Wake-word detection on an Arduino.",
            "skillsPracticed": ["Audio DSP", "Quantization"],
            "difficulty": "Intermediate"
        }],
        "resumeTips": ["Lead with hardware projects"],
        "localJobMarketInsights": "Bengaluru has steady demand for embedded roles.",
        "globalJobMarketInsights": "Edge AI hiring is growing worldwide."
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Admin store
// ────────────────────────────────────────────────────────────────────────────

/// `AdminStore` over plain maps. `writes` counts rows actually changed.
#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<Uuid, Profile>>,
    links: Mutex<Vec<AffiliateLink>>,
    profile_lookups: AtomicUsize,
    writes: AtomicUsize,
    fail_profiles: AtomicBool,
    fail_links: AtomicBool,
}

impl MemoryStore {
    pub fn add_profile(&self, role: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.profiles.lock().unwrap().insert(
            id,
            Profile {
                id,
                full_name: None,
                role: role.to_string(),
                updated_at: None,
            },
        );
        id
    }

    pub fn profile(&self, id: Uuid) -> Option<Profile> {
        self.profiles.lock().unwrap().get(&id).cloned()
    }

    pub fn profile_lookups(&self) -> usize {
        self.profile_lookups.load(Ordering::SeqCst)
    }

    pub fn fail_profile_lookups(&self) {
        self.fail_profiles.store(true, Ordering::SeqCst);
    }

    pub fn fail_link_reads(&self) {
        self.fail_links.store(true, Ordering::SeqCst);
    }

    pub fn seed_link(&self, link: AffiliateLink) {
        self.links.lock().unwrap().push(link);
    }

    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn unavailable() -> AppError {
        AppError::Database(sqlx::Error::PoolTimedOut)
    }

    fn title_taken(links: &[AffiliateLink], title: &str, exclude: Option<Uuid>) -> bool {
        let wanted = normalize_title(title);
        links
            .iter()
            .any(|l| Some(l.id) != exclude && normalize_title(&l.title) == wanted)
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn fetch_profile(&self, actor: &Identity) -> Result<Option<Profile>, AppError> {
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.profile(actor.user_id))
    }

    async fn update_profile_name(
        &self,
        actor: &Identity,
        full_name: &str,
    ) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&actor.user_id)
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", actor.user_id)))?;
        profile.full_name = Some(full_name.to_string());
        profile.updated_at = Some(Utc::now());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(profile.clone())
    }

    async fn list_links(&self) -> Result<Vec<AffiliateLink>, AppError> {
        if self.fail_links.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.links.lock().unwrap().clone())
    }

    async fn find_link_by_title(
        &self,
        _actor: &Identity,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<AffiliateLink>, AppError> {
        let wanted = normalize_title(title);
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| Some(l.id) != exclude && normalize_title(&l.title) == wanted)
            .cloned())
    }

    async fn insert_link(
        &self,
        _actor: &Identity,
        form: &AffiliateLinkForm,
    ) -> Result<AffiliateLink, AppError> {
        let mut links = self.links.lock().unwrap();
        if Self::title_taken(&links, &form.title, None) {
            return Err(AppError::Conflict(format!(
                "An affiliate link titled '{}' already exists.",
                form.title
            )));
        }
        let link = AffiliateLink {
            id: Uuid::new_v4(),
            title: form.title.clone(),
            affiliate_url: form.affiliate_url.clone(),
            display_text: form.display_text.clone(),
            created_at: Utc::now(),
        };
        links.push(link.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(link)
    }

    async fn update_link(
        &self,
        _actor: &Identity,
        id: Uuid,
        form: &AffiliateLinkForm,
    ) -> Result<Option<AffiliateLink>, AppError> {
        let mut links = self.links.lock().unwrap();
        if Self::title_taken(&links, &form.title, Some(id)) {
            return Err(AppError::Conflict(format!(
                "An affiliate link titled '{}' already exists.",
                form.title
            )));
        }
        let Some(link) = links.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        link.title = form.title.clone();
        link.affiliate_url = form.affiliate_url.clone();
        link.display_text = form.display_text.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Some(link.clone()))
    }

    async fn delete_link(&self, _actor: &Identity, id: Uuid) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        let removed = links.len() < before;
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payments and notifications
// ────────────────────────────────────────────────────────────────────────────

pub struct FixedPayments {
    accept: bool,
    checks: AtomicUsize,
}

impl FixedPayments {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            checks: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            checks: AtomicUsize::new(0),
        }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentVerifier for FixedPayments {
    async fn verify(&self, proof: &PaymentProof) -> Result<VerifiedPayment, PaymentError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if !self.accept {
            return Err(PaymentError::Rejected(
                "Payment has not been captured.".to_string(),
            ));
        }
        Ok(VerifiedPayment {
            payment_id: proof.payment_id.clone(),
            amount_minor: 49900,
            currency: "INR".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<EmailRequest>>,
}

impl RecordingNotifier {
    pub fn recipients(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.recipient.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn record(&self, email: &EmailRequest) -> Result<NotificationReceipt, AppError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(NotificationReceipt {
            id: Uuid::new_v4(),
            recipient: email.recipient.clone(),
            subject: email.subject_or_default().to_string(),
            body: email.body.clone(),
            delivered: false,
            recorded_at: Utc::now(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Whole application
// ────────────────────────────────────────────────────────────────────────────

/// Router over in-memory doubles, with handles kept for assertions.
pub struct TestApp {
    pub model: Arc<ScriptedModel>,
    pub store: Arc<MemoryStore>,
    pub payments: Arc<FixedPayments>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_model(ScriptedModel::replying(&sample_free_output().to_string()))
    }

    pub fn with_reply(reply: &str) -> Self {
        Self::with_model(ScriptedModel::replying(reply))
    }

    pub fn failing_model() -> Self {
        Self::with_model(ScriptedModel::failing())
    }

    fn with_model(model: ScriptedModel) -> Self {
        Self {
            model: Arc::new(model),
            store: Arc::new(MemoryStore::default()),
            payments: Arc::new(FixedPayments::accepting()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub fn rejecting_payments(mut self) -> Self {
        self.payments = Arc::new(FixedPayments::rejecting());
        self
    }

    pub fn seed_link(&self, title: &str) {
        self.store.seed_link(AffiliateLink {
            id: Uuid::new_v4(),
            title: title.to_string(),
            affiliate_url: format!("https://example.com/{}", normalize_title(title).replace(' ', "-")),
            display_text: None,
            created_at: Utc::now(),
        });
    }

    pub fn state(&self) -> AppState {
        AppState {
            llm: self.model.clone(),
            store: self.store.clone(),
            sessions: Arc::new(SessionVerifier::new(&test_session_config())),
            payments: self.payments.clone(),
            notifier: self.notifier.clone(),
            dashboards: Dashboards::sample(),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state())
    }
}
