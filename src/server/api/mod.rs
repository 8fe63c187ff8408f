//! This module contains the API endpoints for the server.
pub mod export;
pub mod health;
pub mod ingest;
pub mod routes;
pub mod state;
