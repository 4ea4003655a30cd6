use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by every action endpoint, success or failure.
///
/// Failures are produced by `AppError::into_response`; handlers only build the
/// success side through [`ActionResult::ok`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
    /// Provider-specific fields (SQLSTATE code, hint) for external-service failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Where the client should navigate next, e.g. the login page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            code: None,
            issues: None,
            details: None,
            redirect: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code: Some(code.to_string()),
            issues: None,
            details: None,
            redirect: None,
        }
    }

    pub fn with_issues(mut self, issues: Vec<String>) -> Self {
        self.issues = Some(issues);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }
}
