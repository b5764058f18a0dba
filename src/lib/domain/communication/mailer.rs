//! Email service module

use async_trait::async_trait;

mod errors;
mod message;

pub use errors::{ConfigurationError, MailerError, ProviderError};
pub use message::{BodyFormat, ComposedMessage, Message};

/// Email service
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The composed [`Message`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing `true` once the provider has accepted the
    /// message, or an [`Err`] containing a [`MailerError`] if it could not be sent.
    async fn send(&self, message: &dyn Message) -> Result<bool, MailerError>;

    /// Sends several emails, one after another.
    ///
    /// Stops at the first failure and returns its error.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the number of messages sent.
    async fn send_multiple(&self, messages: &[&dyn Message]) -> Result<usize, MailerError> {
        let mut sent = 0;

        for message in messages {
            if self.send(*message).await? {
                sent += 1;
            }
        }

        Ok(sent)
    }
}
