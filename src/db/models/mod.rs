//! This module contains the structs stored in the database collections.

/// Verification results posted by the document verification pipeline.
pub mod verification_result;
