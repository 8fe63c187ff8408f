//! Running the CLI
use crate::server::app::{serve_results, Settings, DEFAULT_JSON_LIMIT};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Stores identity-verification results in MongoDB and exports them as a spreadsheet.
///
/// Every option can also be set through the environment, or a `.env` file
/// in the working directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017/verification`.
    /// The path names the database.
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    mongodb_uri: Option<String>,
    /// Address on which to serve.
    #[arg(long, env = "SERVER_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port on which to serve.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,
    /// Directory for temporary spreadsheet exports.
    #[arg(long, env = "EXPORT_DIR", default_value = "uploads")]
    export_dir: PathBuf,
    /// Maximum size of an ingestion request body, in bytes.
    #[arg(long, env = "JSON_LIMIT", default_value_t = DEFAULT_JSON_LIMIT)]
    json_limit: usize,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            mongodb_uri: cli.mongodb_uri,
            host: cli.host,
            port: cli.port,
            export_dir: cli.export_dir,
            json_limit: cli.json_limit,
        }
    }
}

/// Log to stdout, at `info` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the server can't bind to its address.
pub fn run() -> std::io::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Ignoring unreadable .env file: {err}"),
    }
    tracing::debug!("Starting application");
    let cli = Cli::parse();
    serve_results(cli.into())
}
