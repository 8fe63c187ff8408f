//! Functionality for serving verification results over HTTP.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
