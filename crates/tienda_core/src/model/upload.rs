//! Uploaded file descriptor handed over by the field-extraction boundary.
//!
//! # Responsibility
//! - Carry the raw bytes plus original metadata of one inbound file,
//!   independent of the transport (JSON or multipart) it arrived on.

use serde::{Deserialize, Serialize};

/// One inbound file as supplied by the external field extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Original client-side file name; the extension is taken from here.
    pub filename: String,
    /// Raw content bytes.
    pub content: Vec<u8>,
    /// Declared content type; informational only, not trusted for
    /// validation.
    pub content_type: String,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content,
            content_type: content_type.into(),
        }
    }
}
