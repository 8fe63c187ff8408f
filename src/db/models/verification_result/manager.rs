//! Manager for the verification result model.
use crate::db::DatabaseConnection;
use async_trait::async_trait;
use futures::TryStreamExt as _;
use mongodb::Collection;

use super::{VerificationResult, COLLECTION_NAME};

impl DatabaseConnection {
    /// Typed handle on the verification results collection.
    fn verification_results(&self) -> Collection<VerificationResult> {
        self.database.collection(COLLECTION_NAME)
    }
}

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Insert all results with one `insertMany` call.
    ///
    /// # Errors
    /// Errors if the bulk write fails, even if some documents were written.
    async fn insert_many(&self, results: &[VerificationResult]) -> anyhow::Result<usize> {
        let outcome = self
            .verification_results()
            .insert_many(results, None)
            .await?;
        Ok(outcome.inserted_ids.len())
    }

    /// Find all results, unfiltered and unsorted.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database, or a document can't be decoded.
    async fn find_all(&self) -> anyhow::Result<Vec<VerificationResult>> {
        let cursor = self.verification_results().find(None, None).await?;
        let rows: Vec<VerificationResult> = cursor.try_collect().await?;
        Ok(rows)
    }
}
