//! The http module helper functions useful for serving http content
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use std::path::Path;

/// `get_contenttype` uses the file extension to return the `ContentType`
/// for the content at `path`. If the extension is unknown or missing,
/// we return octet stream.
#[must_use]
pub fn get_contenttype(path: &str) -> ContentType {
    let mime = mime_guess::from_path(Path::new(path)).first_or_octet_stream();
    ContentType(mime)
}

/// `Content-Disposition` header asking the client to save the body as `filename`.
#[must_use]
pub fn attachment(filename: &str) -> ContentDisposition {
    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename.to_owned())],
    }
}
