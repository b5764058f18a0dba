//! Mailbox

use std::fmt;

use super::EmailAddress;

/// An email address with an optional display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    /// The bare address
    pub address: EmailAddress,

    /// The display name, e.g. "No Reply"
    pub name: Option<String>,
}

impl Mailbox {
    /// Create a new mailbox
    pub fn new(address: EmailAddress, name: Option<String>) -> Self {
        Self { address, name }
    }
}

impl From<EmailAddress> for Mailbox {
    fn from(address: EmailAddress) -> Self {
        Self::new(address, None)
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
