use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models;

/// Response for a stored verification result.
#[derive(Serialize, Debug)]
pub struct VerificationResult {
    /// Hex encoded store identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Name extracted from the document.
    pub name: String,
    /// Unique identification number extracted from the document.
    pub uid: String,
    /// Address extracted from the document.
    pub address: String,
    /// Verdict of the verification.
    pub final_remark: String,
    /// Classification of the document.
    pub document_type: String,
    /// When the result was stored, in RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl From<models::verification_result::VerificationResult> for VerificationResult {
    fn from(value: models::verification_result::VerificationResult) -> Self {
        Self {
            id: value.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: value.name,
            uid: value.uid,
            address: value.address,
            final_remark: value.final_remark,
            document_type: value.document_type,
            timestamp: value.timestamp,
        }
    }
}
