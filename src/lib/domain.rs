//! Domain module

pub mod communication;
