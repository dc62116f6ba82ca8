//! Middleware components for the lead gateway

pub mod cors;
pub mod logging;
