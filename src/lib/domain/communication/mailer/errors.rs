//! Mailer errors

use thiserror::Error;

/// The mailer is missing required settings.
///
/// Raised before any network activity takes place.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No API key was configured
    #[error("apiKey must be set")]
    MissingApiKey,

    /// No sending domain was configured
    #[error("domain must be set")]
    MissingDomain,
}

/// Errors returned by the email provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request could not be sent, or the response could not be read
    #[error("request to the email provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API base URL cannot be used
    #[error("invalid email provider endpoint: {0}")]
    InvalidEndpoint(String),

    /// The provider answered with a non-success status
    #[error("email provider rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// The provider's explanation
        message: String,
    },
}

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// The mailer is misconfigured
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The message has no recipient
    #[error("message has no recipient")]
    MissingRecipient,

    /// The message has no sender
    #[error("message has no sender")]
    MissingSender,
}
