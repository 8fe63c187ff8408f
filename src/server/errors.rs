//! Errors surfaced by the server, at startup and per request.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

use crate::db::models::verification_result::BatchError;

/// Errors that stop the server before it accepts traffic.
#[derive(Debug, Display)]
pub enum StartupError {
    /// A required configuration value is absent.
    #[display(fmt = "missing required configuration `{}`", _0)]
    Config(&'static str),
    /// The document store could not be reached.
    #[display(fmt = "could not connect to database: {:#}", _0)]
    Connection(anyhow::Error),
}

impl std::error::Error for StartupError {}

/// Per-request errors, converted into a JSON `{error, details}` response.
#[derive(Debug, Display)]
pub enum HTTPError {
    /// The application was started without a database.
    #[display(fmt = "Database connection not available")]
    DatabaseUnavailable,
    /// The request body has the wrong shape.
    #[display(fmt = "Invalid input: expected a non-empty array of results")]
    InvalidBody(String),
    /// An element of an otherwise well-formed batch could not be processed.
    #[display(fmt = "Error processing results")]
    Processing(String),
    /// The store failed after the request was validated.
    #[display(fmt = "Error storing results")]
    Storage(String),
    /// The store failed while reading results.
    #[display(fmt = "Error fetching results")]
    Fetch(String),
    /// The spreadsheet could not be built or written.
    #[display(fmt = "Error generating spreadsheet")]
    Render(String),
    /// There is nothing to export.
    #[display(fmt = "No results found")]
    NotFound,
    /// No route matches the request.
    #[display(fmt = "Not found")]
    RouteNotFound,
    /// The route exists but does not accept the request method.
    #[display(fmt = "Method not allowed")]
    MethodNotAllowed(String),
}

impl std::error::Error for HTTPError {}

/// JSON body of every failure response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    /// Human readable summary.
    pub error: String,
    /// Underlying failure message. Clients should not rely on its format.
    pub details: String,
}

impl HTTPError {
    /// Details of the failure, safe to show to clients.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::InvalidBody(details)
            | Self::Processing(details)
            | Self::Storage(details)
            | Self::Fetch(details)
            | Self::Render(details) => details.clone(),
            Self::DatabaseUnavailable => String::from("the server was started without a database"),
            Self::NotFound => String::from("there are no verification results to export"),
            Self::RouteNotFound => String::from("no such endpoint"),
            Self::MethodNotAllowed(method) => format!("{method} is not supported on this endpoint"),
        }
    }
}

impl ResponseError for HTTPError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::DatabaseUnavailable
            | Self::Processing(_)
            | Self::Storage(_)
            | Self::Fetch(_)
            | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

impl From<BatchError> for HTTPError {
    fn from(error: BatchError) -> Self {
        match error {
            BatchError::Validation(details) => Self::Processing(details),
            BatchError::Storage(err) => Self::Storage(format!("{err:#}")),
        }
    }
}
