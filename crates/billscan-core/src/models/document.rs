//! Input documents.

use serde::{Deserialize, Serialize};

/// One source text to be parsed into an [`InvoiceRecord`](super::invoice::InvoiceRecord).
///
/// The text is already decoded; converting PDFs or images to text happens
/// upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque source identifier, usually the file name.
    pub source: String,

    /// Full decoded text.
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}
