use serde_json::Value;

use crate::db::models::verification_result::RawRecord;
use crate::server::errors::HTTPError;

/// Turn a request body into the records of a batch.
///
/// The whole batch is rejected on the first element that is not an object.
///
/// # Errors
/// [`HTTPError::InvalidBody`] if the body is not an array or is empty,
/// [`HTTPError::Processing`] if an element is malformed.
pub fn parse_batch(body: Value) -> Result<Vec<RawRecord>, HTTPError> {
    let Value::Array(elements) = body else {
        return Err(HTTPError::InvalidBody(String::from(
            "request body must be a JSON array",
        )));
    };
    if elements.is_empty() {
        return Err(HTTPError::InvalidBody(String::from(
            "request body is an empty array",
        )));
    }
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| RawRecord::from_element(index, element).map_err(HTTPError::from))
        .collect()
}
