use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Display;
use mongodb::bson::{self, oid::ObjectId};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod manager;

/// Name of the collection holding verification results.
pub const COLLECTION_NAME: &str = "verificationresults";

/// Trait for managing verification results.
#[async_trait]
pub trait Manager: Send + Sync {
    /// Write all `results` in a single bulk insert.
    /// Returns the number of documents the store reports as inserted.
    async fn insert_many(&self, results: &[VerificationResult]) -> anyhow::Result<usize>;
    /// Find every stored verification result, in store-defined order.
    async fn find_all(&self) -> anyhow::Result<Vec<VerificationResult>>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
/// Model for a verification result.
pub struct VerificationResult {
    /// Store-assigned identifier. `None` until the document is inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Name extracted from the document.
    #[serde(default)]
    pub name: String,
    /// Unique identification number extracted from the document.
    #[serde(default)]
    pub uid: String,
    /// Address extracted from the document.
    #[serde(default)]
    pub address: String,
    /// Verdict of the verification, e.g. `Matched` or `Low match score`.
    #[serde(default)]
    pub final_remark: String,
    /// Classification of the document, e.g. `Aadhaar`.
    #[serde(default)]
    pub document_type: String,
    /// When the result was stored. Always assigned by the server.
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl VerificationResult {
    /// Create a new, not yet stored, verification result.
    #[must_use]
    pub fn new(record: RawRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: record.name,
            uid: record.uid,
            address: record.address,
            final_remark: record.final_remark,
            document_type: record.document_type,
            timestamp,
        }
    }
}

/// A verification result as submitted by a client.
///
/// Every field is optional. Absent and falsy values (`null`, `false`, `0`, `""`)
/// become empty strings, other scalars are kept as their JSON text.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RawRecord {
    /// Name extracted from the document.
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Unique identification number extracted from the document.
    #[serde(deserialize_with = "lenient_string")]
    pub uid: String,
    /// Address extracted from the document.
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    /// Verdict of the verification.
    #[serde(deserialize_with = "lenient_string")]
    pub final_remark: String,
    /// Classification of the document.
    #[serde(deserialize_with = "lenient_string")]
    pub document_type: String,
}

impl RawRecord {
    /// Parse one element of a submitted batch.
    ///
    /// # Errors
    /// Errors if the element is not a JSON object, or one of its fields holds an array or object.
    pub fn from_element(index: usize, element: Value) -> Result<Self, BatchError> {
        if !element.is_object() {
            return Err(BatchError::Validation(format!(
                "element {index} is not an object"
            )));
        }
        serde_json::from_value(element)
            .map_err(|err| BatchError::Validation(format!("element {index}: {err}")))
    }
}

/// Accept any JSON scalar as a string field.
///
/// Numbers are written the way they read: `1234`, `2.5`, and `100` for `1e2`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Bool(true) => Ok(String::from("true")),
        Value::Number(number) => Ok(match number.as_f64() {
            Some(float) if float == 0.0 => String::new(),
            // `Display` for `f64` drops the fraction of integral values: `1.0` -> `1`
            Some(float) if number.is_f64() => float.to_string(),
            _ => number.to_string(),
        }),
        Value::String(text) => Ok(text),
        Value::Array(_) | Value::Object(_) => Err(de::Error::invalid_type(
            de::Unexpected::Other("array or object"),
            &"a string, number, boolean or null",
        )),
    }
}

/// Failure of a batch insert.
#[derive(Debug, Display)]
pub enum BatchError {
    /// The batch, or one of its elements, is malformed. Nothing was written.
    #[display(fmt = "{}", _0)]
    Validation(String),
    /// The store rejected the write, possibly after applying part of it.
    #[display(fmt = "{}", _0)]
    Storage(anyhow::Error),
}

impl std::error::Error for BatchError {}

/// Normalize and store a batch of submitted results.
///
/// All records of the batch share one timestamp, truncated to the millisecond
/// precision the store keeps.
///
/// # Errors
/// Errors with [`BatchError::Validation`] on an empty batch, before touching the store,
/// and with [`BatchError::Storage`] if the bulk insert fails.
pub async fn insert_batch(
    store: &dyn Manager,
    records: Vec<RawRecord>,
) -> Result<usize, BatchError> {
    if records.is_empty() {
        return Err(BatchError::Validation(String::from(
            "expected a non-empty array of results",
        )));
    }
    let timestamp = bson::DateTime::now().to_chrono();
    let results: Vec<VerificationResult> = records
        .into_iter()
        .map(|record| VerificationResult::new(record, timestamp))
        .collect();
    let inserted = store
        .insert_many(&results)
        .await
        .map_err(BatchError::Storage)?;
    tracing::debug!("Inserted {inserted} of {} results", results.len());
    Ok(inserted)
}
