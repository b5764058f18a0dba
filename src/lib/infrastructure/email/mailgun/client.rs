//! Mailgun HTTP API client

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::ProviderError;

/// Request timeout applied by [`HttpClientFactory::default`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The form fields of a Mailgun send request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendParams {
    /// Bare sender address
    pub from: String,

    /// Bare recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// HTML body
    pub html: String,
}

/// Mailgun's acknowledgement of a queued message
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    /// The message id assigned by Mailgun
    #[serde(default)]
    pub id: String,

    /// Status text, e.g. "Queued. Thank you."
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// A handle on the Mailgun messages API
#[async_trait]
pub trait MailgunClient: Send + Sync + 'static {
    /// Sends a message through `domain`.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing Mailgun's [`SendResponse`],
    /// or an [`Err`] containing the [`ProviderError`] raised by the call.
    async fn send_message(
        &self,
        domain: &str,
        params: &SendParams,
    ) -> Result<SendResponse, ProviderError>;
}

#[cfg(test)]
mock! {
    pub MailgunClient {}

    #[async_trait]
    impl MailgunClient for MailgunClient {
        async fn send_message(&self, domain: &str, params: &SendParams) -> Result<SendResponse, ProviderError>;
    }
}

/// Builds [`MailgunClient`] handles
pub trait MailgunClientFactory: Send + Sync + 'static {
    /// Creates a client authenticating with `api_key` against `base_url`.
    fn create(&self, api_key: &str, base_url: &str)
        -> Result<Arc<dyn MailgunClient>, ProviderError>;
}

#[cfg(test)]
mock! {
    pub ClientFactory {}

    impl MailgunClientFactory for ClientFactory {
        fn create(&self, api_key: &str, base_url: &str) -> Result<Arc<dyn MailgunClient>, ProviderError>;
    }
}

/// Creates [`HttpMailgunClient`]s
#[derive(Clone, Debug)]
pub struct HttpClientFactory {
    timeout: Duration,
}

impl HttpClientFactory {
    /// Create a factory whose clients time out after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpClientFactory {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl MailgunClientFactory for HttpClientFactory {
    fn create(
        &self,
        api_key: &str,
        base_url: &str,
    ) -> Result<Arc<dyn MailgunClient>, ProviderError> {
        Ok(Arc::new(HttpMailgunClient::new(
            api_key,
            base_url,
            self.timeout,
        )?))
    }
}

/// Mailgun client backed by [`reqwest`]
#[derive(Clone)]
pub struct HttpMailgunClient {
    http: Client,
    api_key: String,
    base_url: Url,
}

impl HttpMailgunClient {
    /// Create a new client
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let invalid = || ProviderError::InvalidEndpoint(base_url.to_string());

        let base_url = Url::parse(base_url).map_err(|_| invalid())?;

        if base_url.cannot_be_a_base() {
            return Err(invalid());
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url,
        })
    }

    /// `{base_url}/v3/{domain}/messages`, with `domain` escaped as a single path segment
    fn messages_url(&self, domain: &str) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v3", domain, "messages"]);

        Ok(url)
    }
}

impl fmt::Debug for HttpMailgunClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMailgunClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[async_trait]
impl MailgunClient for HttpMailgunClient {
    async fn send_message(
        &self,
        domain: &str,
        params: &SendParams,
    ) -> Result<SendResponse, ProviderError> {
        let response = self
            .http
            .post(self.messages_url(domain)?)
            .basic_auth("api", Some(&self.api_key))
            .form(params)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|error| error.message)
                .unwrap_or(body);

            warn!(status = status.as_u16(), %message, "Mailgun rejected the message");

            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
