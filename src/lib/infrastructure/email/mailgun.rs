//! Mailgun mailer implementation

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::communication::mailer::{
    BodyFormat, ConfigurationError, Mailer, MailerError, Message,
};

mod client;

pub use client::{
    HttpClientFactory, HttpMailgunClient, MailgunClient, MailgunClientFactory, SendParams,
    SendResponse, DEFAULT_TIMEOUT,
};

/// The Mailgun region an account lives in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MailgunRegion {
    /// api.mailgun.net
    #[default]
    Us,

    /// api.eu.mailgun.net
    Eu,
}

impl MailgunRegion {
    /// The API base URL for the region
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Us => "https://api.mailgun.net",
            Self::Eu => "https://api.eu.mailgun.net",
        }
    }
}

/// Mailgun configuration
#[derive(Clone, Default, Parser)]
pub struct MailgunConfig {
    /// The Mailgun API key
    #[clap(long, env = "MAILGUN_API_KEY")]
    pub api_key: Option<String>,

    /// The verified sending domain, e.g. mg.example.com
    #[clap(long = "domain", env = "MAILGUN_DOMAIN")]
    pub sending_domain: Option<String>,

    /// The region the account belongs to
    #[clap(long, env = "MAILGUN_REGION", value_enum, default_value = "us")]
    pub region: MailgunRegion,

    /// Overrides the region's API base URL
    #[clap(long, env = "MAILGUN_ENDPOINT")]
    pub endpoint: Option<String>,
}

impl MailgunConfig {
    /// Create a configuration for the US region
    pub fn new(api_key: &str, sending_domain: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            sending_domain: Some(sending_domain.to_string()),
            ..Self::default()
        }
    }

    /// The trimmed API key, unless it is unset or blank
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    /// The trimmed sending domain, unless it is unset or blank
    pub fn sending_domain(&self) -> Option<&str> {
        non_blank(self.sending_domain.as_deref())
    }

    /// The API base URL requests are sent to
    pub fn base_url(&self) -> &str {
        non_blank(self.endpoint.as_deref()).unwrap_or_else(|| self.region.base_url())
    }

    /// Checks that everything needed to send is present.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.api_key().ok_or(ConfigurationError::MissingApiKey)?;
        self.sending_domain()
            .ok_or(ConfigurationError::MissingDomain)?;

        Ok(())
    }
}

impl fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("sending_domain", &self.sending_domain)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Mailer delivering through the Mailgun API
///
/// Only the first recipient and the first sender of a message are used, and
/// only its HTML body is forwarded.
pub struct MailgunMailer<F = HttpClientFactory>
where
    F: MailgunClientFactory,
{
    config: MailgunConfig,
    factory: Arc<F>,
    client: Arc<OnceCell<Arc<dyn MailgunClient>>>,
}

impl MailgunMailer {
    /// Create a new Mailgun mailer
    pub fn new(config: MailgunConfig) -> Self {
        Self::with_factory(config, HttpClientFactory::default())
    }
}

impl<F> MailgunMailer<F>
where
    F: MailgunClientFactory,
{
    /// Create a new Mailgun mailer whose client is built by `factory`
    pub fn with_factory(config: MailgunConfig, factory: F) -> Self {
        Self {
            config,
            factory: Arc::new(factory),
            client: Arc::new(OnceCell::new()),
        }
    }

    /// The mailer's configuration
    pub fn config(&self) -> &MailgunConfig {
        &self.config
    }

    /// Returns the Mailgun client, creating it on first use.
    ///
    /// The same handle is returned on every later call.
    pub async fn client(&self) -> Result<Arc<dyn MailgunClient>, MailerError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let api_key = self
                    .config
                    .api_key()
                    .ok_or(ConfigurationError::MissingApiKey)?;

                debug!(base_url = self.config.base_url(), "creating Mailgun client");

                Ok::<_, MailerError>(self.factory.create(api_key, self.config.base_url())?)
            })
            .await?;

        Ok(Arc::clone(client))
    }
}

impl<F> Clone for MailgunMailer<F>
where
    F: MailgunClientFactory,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            factory: Arc::clone(&self.factory),
            client: Arc::clone(&self.client),
        }
    }
}

impl<F> fmt::Debug for MailgunMailer<F>
where
    F: MailgunClientFactory,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunMailer")
            .field("config", &self.config)
            .field("client", &self.client.initialized())
            .finish()
    }
}

/// Maps a message onto Mailgun's form fields.
///
/// Recipients after the first are dropped, as are sender display names and
/// non-HTML bodies.
fn send_params(message: &dyn Message) -> Result<SendParams, MailerError> {
    let to = message.to().first().ok_or(MailerError::MissingRecipient)?;
    let from = message.from().first().ok_or(MailerError::MissingSender)?;

    Ok(SendParams {
        from: from.address.to_string(),
        to: to.to_string(),
        subject: message.subject().to_string(),
        html: message
            .body(BodyFormat::Html)
            .unwrap_or_default()
            .to_string(),
    })
}

#[async_trait]
impl<F> Mailer for MailgunMailer<F>
where
    F: MailgunClientFactory,
{
    async fn send(&self, message: &dyn Message) -> Result<bool, MailerError> {
        info!("sending email");

        let domain = self
            .config
            .sending_domain()
            .ok_or(ConfigurationError::MissingDomain)?;

        let client = self.client().await?;
        let params = send_params(message)?;

        let response = client.send_message(domain, &params).await?;

        debug!(id = %response.id, "Mailgun accepted the message");

        Ok(true)
    }
}
