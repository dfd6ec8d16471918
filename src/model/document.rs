//! Search result records and the document reference held by the view state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A search result as delivered by the results pipeline.
///
/// Only `id` matters to the view-state core; the remaining fields are
/// carried through for the preview surface and the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Engine identifier of the result.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Source URL, when the result links to an external resource.
    #[serde(default)]
    pub url: Option<String>,
}

impl Record {
    /// Create a record with just an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            url: None,
        }
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the source URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Identity of the document opened for preview.
///
/// Never empty. The raw constructor is private; use [`DocumentRef::new`]
/// or [`DocumentRef::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Smart constructor: rejects empty and whitespace-only identifiers.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidDocumentRef> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(InvalidDocumentRef::Empty)
        } else {
            Ok(Self(raw))
        }
    }

    /// Reference the document behind a search record.
    pub fn from_record(record: &Record) -> Result<Self, InvalidDocumentRef> {
        Self::new(record.id.as_str())
    }

    /// The document identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejected document reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDocumentRef {
    /// No identifier, or an identifier made only of whitespace.
    #[error("Document reference cannot be empty")]
    Empty,
}
