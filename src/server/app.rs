//! Serve verification results.
#![allow(clippy::exit, clippy::module_name_repetitions)]
use crate::db::{self, Db as _};
use crate::server::api::state::App as AppState;
use crate::server::errors::StartupError;
use crate::server::tracing::ResultsRootSpanBuilder;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};

use std::{io, path::PathBuf, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;
use tracing_actix_web::TracingLogger;

use super::api::state::Global;
use crate::server::api::routes;

/// Default maximum size of an ingestion request body, in bytes.
pub const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024;

/// Settings the server is started with.
#[derive(Debug, Clone)]
pub struct Settings {
    /// MongoDB connection string. Required.
    pub mongodb_uri: Option<String>,
    /// Address to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Directory for per-request export files.
    pub export_dir: PathBuf,
    /// Maximum size of an ingestion request body, in bytes.
    pub json_limit: usize,
}

/// Serve verification results until an interrupt or terminate signal arrives,
/// then close the database connection.
///
/// Exits the process with status 1 if the database is not configured or unreachable.
///
/// # Errors
/// Errors if the server can't bind to the configured address.
#[actix_web::main]
pub async fn serve_results(settings: Settings) -> io::Result<()> {
    let state = match connect(&settings).await {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(
                "error: could not start server. Confirm that MONGODB_URI env var is set correctly."
            );
            tracing::error!("Error: {err}");
            process::exit(1);
        }
    };

    let Settings {
        host,
        port,
        json_limit,
        ..
    } = settings;
    tracing::info!("Running verification results server on http://{host}:{port}.");

    let server_state = state.clone();
    HttpServer::new(move || init_app(&server_state, json_limit))
        .bind((host.as_str(), port))?
        .run()
        .await?;

    shutdown(state).await;
    Ok(())
}

/// Build the application state: connect to the database named in `settings`.
///
/// # Errors
/// [`StartupError::Config`] if no connection string is configured,
/// [`StartupError::Connection`] if the database can't be reached.
pub async fn connect(settings: &Settings) -> Result<AppState, StartupError> {
    let uri = settings
        .mongodb_uri
        .as_deref()
        .filter(|uri| !uri.trim().is_empty())
        .ok_or(StartupError::Config("MONGODB_URI"))?;
    let db = db::init::connect(uri)
        .await
        .map_err(StartupError::Connection)?;
    Ok(AppState::new(db, settings.export_dir.clone()))
}

/// Close the database connection held by `state`, waiting for in-flight operations.
pub async fn shutdown(state: AppState) {
    tracing::info!("Server stopped, closing database connection");
    if let Some(db) = state.db {
        db.close().await;
        tracing::info!("Database connection closed");
    }
}

/// Initialize the application and all routing.
///
/// # Arguments
/// * `state` - The application state
/// * `json_limit` - Maximum size of an ingestion request body, in bytes
pub fn init_app<T: Global + Clone + 'static>(
    state: &T,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    routes::register_app(App::new(), state, json_limit)
        .wrap(TracingLogger::<ResultsRootSpanBuilder>::new())
}
