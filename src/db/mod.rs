//! Database related module.
use async_trait::async_trait;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tracing::instrument;

/// Database initialization.
pub mod init;
/// Models for the database.
pub mod models;

/// Name of the database used when the connection string carries no path.
pub const DEFAULT_DATABASE_NAME: &str = "verification";

#[async_trait]
/// Generic Database
pub trait Db {
    /// Connects to a database.
    ///
    /// # Errors
    /// Errors if the connection string is invalid or the server can't be reached.
    async fn connect(url: &str) -> anyhow::Result<DatabaseConnection>;
    /// Closes the connection, waiting for in-flight operations to finish.
    async fn close(self);
}

/// Database connection.
///
/// Cloning is cheap: all clones share the same underlying client and pool.
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    /// MongoDB client.
    pub client: Client,
    /// Database selected from the connection string.
    pub database: Database,
}

#[async_trait]
impl Db for DatabaseConnection {
    /// Connects to a MongoDB deployment and checks that it answers a `ping`.
    ///
    /// # Errors
    /// Errors if connection to database fails.
    #[instrument(level = "trace", skip(db_url))]
    async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(db_url).await?;
        let name = database_name(&options);
        let client = Client::with_options(options)?;
        let database = client.database(&name);
        database.run_command(doc! { "ping": 1 }, None).await?;
        tracing::debug!("Selected database '{name}'");
        Ok(Self { client, database })
    }

    async fn close(self) {
        self.client.shutdown().await;
    }
}

/// Database name is the path component of the connection string,
/// falling back to [`DEFAULT_DATABASE_NAME`].
fn database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE_NAME)
        .to_owned()
}
