//! Schema validation for form and API input.
//!
//! Shapes declare their rules with `validator` derive attributes; this module
//! turns a failed check into an itemized list of human-readable issues.
//! Validation is pure and synchronous, and expected invalid input never panics.

use std::fmt;

use validator::{Validate, ValidationErrors};

/// One message per violated constraint, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssues(Vec<String>);

impl ValidationIssues {
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn from_errors(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid ({})", err.code),
                })
            })
            .collect();

        Self(messages)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

/// Checks `input` against its declared rules, handing it back on success.
pub fn validate<T: Validate>(input: T) -> Result<T, ValidationIssues> {
    match input.validate() {
        Ok(()) => Ok(input),
        Err(errors) => Err(ValidationIssues::from_errors(&errors)),
    }
}
