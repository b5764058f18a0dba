//! Email message

use crate::domain::communication::email_addresses::{EmailAddress, Mailbox};

/// The formats a message body can be rendered in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyFormat {
    /// HTML body
    Html,

    /// Plain text body
    Text,
}

/// A fully composed email, as handed to a [`Mailer`](super::Mailer)
pub trait Message: Send + Sync {
    /// The recipients, in the order they were added
    fn to(&self) -> &[EmailAddress];

    /// The senders, in the order they were added
    fn from(&self) -> &[Mailbox];

    /// The subject line
    fn subject(&self) -> &str;

    /// The rendered body in the given format, if the message has one
    fn body(&self, format: BodyFormat) -> Option<&str>;
}

/// Email message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposedMessage {
    /// The recipients of the email
    pub to: Vec<EmailAddress>,

    /// The senders of the email
    pub from: Vec<Mailbox>,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: Option<String>,

    /// The plain text body of the email
    pub text_body: Option<String>,
}

impl ComposedMessage {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sender
    pub fn with_from(mut self, address: EmailAddress, name: Option<&str>) -> Self {
        self.from
            .push(Mailbox::new(address, name.map(str::to_string)));
        self
    }

    /// Adds a recipient
    pub fn with_to(mut self, address: EmailAddress) -> Self {
        self.to.push(address);
        self
    }

    /// Sets the subject
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    /// Sets the HTML body
    pub fn with_html_body(mut self, html: &str) -> Self {
        self.html_body = Some(html.to_string());
        self
    }

    /// Sets the plain text body
    pub fn with_text_body(mut self, text: &str) -> Self {
        self.text_body = Some(text.to_string());
        self
    }
}

impl Message for ComposedMessage {
    fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    fn from(&self) -> &[Mailbox] {
        &self.from
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn body(&self, format: BodyFormat) -> Option<&str> {
        match format {
            BodyFormat::Html => self.html_body.as_deref(),
            BodyFormat::Text => self.text_body.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composed_message_accessors() {
        let message = ComposedMessage::new()
            .with_from(EmailAddress::new_unchecked("s@x.com"), Some("Sender"))
            .with_to(EmailAddress::new_unchecked("a@x.com"))
            .with_to(EmailAddress::new_unchecked("b@x.com"))
            .with_subject("Hi")
            .with_html_body("<p>Hello</p>")
            .with_text_body("Hello");

        assert_eq!(
            Message::to(&message),
            &[
                EmailAddress::new_unchecked("a@x.com"),
                EmailAddress::new_unchecked("b@x.com")
            ]
        );
        assert_eq!(Message::from(&message)[0].name.as_deref(), Some("Sender"));
        assert_eq!(message.subject(), "Hi");
        assert_eq!(message.body(BodyFormat::Html), Some("<p>Hello</p>"));
        assert_eq!(message.body(BodyFormat::Text), Some("Hello"));
    }

    #[test]
    fn test_missing_body_formats() {
        let message = ComposedMessage::new().with_text_body("Hello");

        assert_eq!(message.body(BodyFormat::Html), None);
        assert!(Message::to(&message).is_empty());
        assert!(Message::from(&message).is_empty());
    }
}
