//! Submission state for a report or admin form, independent of any UI toolkit.
//!
//! A form holds at most one outstanding submission. While `Submitting`, a
//! second submit is refused rather than queued. The server never drives a
//! form itself, so only the tests in this module construct these types.

use thiserror::Error;

use crate::models::action::ActionResult;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState<T> {
    Idle,
    Submitting,
    Succeeded(T),
    Failed(Vec<String>),
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent<T> {
    Submit,
    Succeed(T),
    Fail(Vec<String>),
    Reset,
}

#[allow(dead_code)]
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("no submission is in flight")]
    NotSubmitting,
}

impl<T> Default for SubmissionState<T> {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

#[allow(dead_code)]
impl<T> SubmissionState<T> {
    pub fn transition(self, event: FormEvent<T>) -> Result<Self, TransitionError> {
        use FormEvent as E;
        use SubmissionState as S;

        match (self, event) {
            (S::Submitting, E::Submit) => Err(TransitionError::AlreadySubmitting),
            (_, E::Submit) => Ok(S::Submitting),
            (S::Submitting, E::Succeed(data)) => Ok(S::Succeeded(data)),
            (S::Submitting, E::Fail(issues)) => Ok(S::Failed(issues)),
            (_, E::Succeed(_)) | (_, E::Fail(_)) => Err(TransitionError::NotSubmitting),
            (_, E::Reset) => Ok(S::Idle),
        }
    }

    /// Settles an in-flight submission from the server's action result.
    pub fn resolve(self, result: ActionResult<T>) -> Result<Self, TransitionError> {
        let event = match (result.success, result.data) {
            (true, Some(data)) => FormEvent::Succeed(data),
            (_, _) => FormEvent::Fail(
                result
                    .issues
                    .filter(|issues| !issues.is_empty())
                    .unwrap_or_else(|| vec![result.message]),
            ),
        };
        self.transition(event)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !matches!(self, SubmissionState::Submitting)
    }

    pub fn issues(&self) -> &[String] {
        match self {
            SubmissionState::Failed(issues) => issues,
            _ => &[],
        }
    }
}
