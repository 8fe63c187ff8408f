//! # Verification Store
//!
//! A small HTTP service that receives batches of identity-verification
//! results, keeps them in a MongoDB collection, lists them back and exports
//! them as an `.xlsx` spreadsheet.
//!
//! The service is the persistence end of a document verification pipeline:
//! an upstream OCR/matching stage posts its verdicts here, and operators pull
//! them out again either as JSON or as a spreadsheet.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Clippy lint reference:
//   https://rust-lang.github.io/rust-clippy/master/index.html
//
// Everything is a warning during development; CI turns warnings into errors.
#![warn(
    clippy::all,
    missing_docs,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "Restriction lints are enabled wholesale and opted out of below"
)]
#![warn(clippy::restriction)]
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "mongodb and actix-web pull in overlapping versions of several transitive crates"
)]
#![allow(
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::mod_module_files,
    reason = "Modules with request/response submodules live in `mod.rs` files"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Request handling is dominated by database and file I/O, not call overhead"
)]
#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "The crate is a service, its types are not consumed by other crates"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::semicolon_outside_block,
    reason = "Opt in to have semicolon in the outside block across codebase"
)]
#![allow(
    clippy::single_call_fn,
    reason = "We tend to break up long functions into smaller ones, so this lint is not useful"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered by reading flow, not alphabetically"
)]

pub mod db;
pub mod server;
pub mod utils;
