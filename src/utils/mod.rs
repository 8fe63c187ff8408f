//! Utility modules shared by the server and the CLI.

pub mod cli;
pub mod http;
pub mod spreadsheet;
