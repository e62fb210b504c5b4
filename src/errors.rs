//! Error types for dispatch and provider operations.

use crate::Endpoint;

/// A failure raised by a data provider.
///
/// The message is surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Creates a provider error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message exactly as the provider reported it.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::new(e.to_string())
    }
}

/// Errors that can occur while dispatching a request to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The endpoint name is not one of the supported endpoints.
    UnknownEndpoint {
        /// The name that was requested.
        name: String,
    },
    /// One or more required parameters were absent or empty.
    MissingParameter {
        /// The endpoint whose requirement was not met.
        endpoint: Endpoint,
        /// Every required key that was absent.
        missing: Vec<&'static str>,
    },
    /// A parameter could not be coerced to its expected type.
    InvalidParameter {
        /// The offending parameter.
        field: &'static str,
        /// The raw value supplied.
        value: String,
    },
    /// The provider failed; its message is kept verbatim.
    ProviderFailure(ProviderError),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEndpoint { .. } => write!(
                f,
                "Invalid endpoint. Supported endpoints: {}",
                Endpoint::supported()
            ),
            Self::MissingParameter { endpoint, .. } => {
                write!(f, "{}", endpoint.missing_message())
            }
            Self::InvalidParameter { field, value } => {
                write!(f, "Invalid {}: '{}' is not an integer", field, value)
            }
            Self::ProviderFailure(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProviderFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for DispatchError {
    fn from(e: ProviderError) -> Self {
        DispatchError::ProviderFailure(e)
    }
}

impl From<crate::EndpointParseError> for DispatchError {
    fn from(e: crate::EndpointParseError) -> Self {
        DispatchError::UnknownEndpoint { name: e.name }
    }
}
