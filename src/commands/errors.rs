//! # Command Error Handling
//!
//! This module turns dispatch failures into the messages the boxoff CLI
//! prints, using the handled crate for consistent error property extraction.

use handled::Handle;

use crate::{DispatchError, Endpoint};

/// User-friendly error information that can be extracted from various error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    /// The main error message to display to the user
    pub message: String,
    /// Optional usage hint to help the user correct the error
    pub usage_hint: Option<String>,
}

impl UserError {
    /// Creates a user error with a usage hint
    pub fn with_usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            usage_hint: Some(usage.into()),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.usage_hint {
            Some(usage) => write!(f, "{}. Usage: {}", self.message, usage),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for UserError {}

/// Implements Handle<UserError> for itself to allow extraction
impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

impl Handle<UserError> for DispatchError {
    fn handle(&self) -> Option<UserError> {
        match self {
            DispatchError::MissingParameter { endpoint, .. } => Some(UserError::with_usage(
                format!(
                    "{} required for {} endpoint",
                    cli_requirement(*endpoint),
                    endpoint
                ),
                endpoint.usage(),
            )),
            _ => Some(UserError {
                message: self.to_string(),
                usage_hint: None,
            }),
        }
    }
}

/// The requirement phrased in CLI argument order, e.g. "Quarter and year".
fn cli_requirement(endpoint: Endpoint) -> String {
    let names: Vec<&str> = endpoint.params().iter().map(|p| p.name).collect();
    let mut phrase = match names.as_slice() {
        [only] => only.to_string(),
        [first, second] => format!("{} and {}", first, second),
        _ => names.join(", "),
    };
    if let Some(first) = phrase.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    phrase
}

/// Formats an error into the single message the CLI reports.
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    match error.handle() {
        Some(user_error) => user_error.to_string(),
        None => error.to_string(),
    }
}
