//! Error types for the document crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `DocumentError`: store operations (fetch, delete)
//! - `XmlError`: XML parsing and marshalling

use std::fmt;
use xmldoc_core::DocumentId;

/// Errors from document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document does not exist, or it belongs to another owner.
    ///
    /// The two cases are deliberately indistinguishable so callers
    /// cannot confirm that a foreign document ID exists.
    NotAccessible { id: DocumentId },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAccessible { id } => {
                write!(f, "document '{id}' not found or access denied")
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// Errors from XML parsing and marshalling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The input is not well-formed XML, or does not match the target
    /// type's schema.
    Malformed { reason: String },
    /// Serializing a value to XML failed.
    Serialize { reason: String },
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => {
                write!(f, "malformed XML: {reason}")
            }
            Self::Serialize { reason } => {
                write!(f, "failed to serialize to XML: {reason}")
            }
        }
    }
}

impl std::error::Error for XmlError {}
