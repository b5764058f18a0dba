//! Infrastructure module

pub mod email;
