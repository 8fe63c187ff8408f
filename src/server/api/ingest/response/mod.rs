use serde::Serialize;

/// Response for a stored batch.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Stored {
    /// Confirmation message.
    pub message: String,
    /// Number of results the store reports as inserted.
    pub inserted_count: usize,
}

impl Stored {
    /// Build the response for `inserted_count` stored results.
    #[must_use]
    pub fn new(inserted_count: usize) -> Self {
        Self {
            message: String::from("Results stored successfully"),
            inserted_count,
        }
    }
}
