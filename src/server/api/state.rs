//! Centralized state management for the Actix web server
use std::path::{Path, PathBuf};

use crate::db::{self, models::verification_result::Manager};

/// Global, read-only state
pub trait Global: Send + Sync {
    /// Store holding the verification results, if one is connected
    fn db(&self) -> Option<&dyn Manager>;
    /// Directory where per-request export files are written
    fn export_dir(&self) -> &Path;
}

/// Application state
#[derive(Debug, Clone)]
pub struct App {
    /// Database connection
    pub db: Option<db::DatabaseConnection>,
    /// Directory where per-request export files are written
    pub export_dir: PathBuf,
}

impl App {
    /// Create application state around an established connection.
    #[must_use]
    pub fn new(db: db::DatabaseConnection, export_dir: PathBuf) -> Self {
        Self {
            db: Some(db),
            export_dir,
        }
    }
}

impl Global for App {
    fn db(&self) -> Option<&dyn Manager> {
        self.db.as_ref().map(|db| db as &dyn Manager)
    }

    fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}
