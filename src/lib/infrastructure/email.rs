//! Email delivery backends

pub mod mailgun;
