use crate::db::{DatabaseConnection, Db as _};

/// Connects to the MongoDB deployment named by `db_url`.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the server is not running, or if the connection string is invalid.
pub async fn connect(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let connection = DatabaseConnection::connect(db_url).await?;
    tracing::info!(
        database = connection.database.name(),
        "Connected to database"
    );
    Ok(connection)
}
