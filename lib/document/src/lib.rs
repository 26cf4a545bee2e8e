//! XML document storage and conversion for the xmldoc document manager.
//!
//! This crate provides:
//! - `Document`, the stored XML document record, and `DocumentStore`,
//!   the owner-scoped store (list, fetch, save, delete)
//! - Generic XML-to-JSON conversion (`parse_to_value`) with attribute
//!   capture and repeated-element grouping, plus well-formedness
//!   checking and structural metadata extraction
//! - Typed XML marshalling (`from_xml`/`to_xml`) over serde for types
//!   with a fixed schema
//!
//! # Access model
//!
//! Every fetch and delete is scoped by the owner: asking for a document
//! that does not exist and asking for someone else's document are the
//! same observable outcome, so a caller cannot confirm that a foreign
//! document ID exists.

pub mod document;
pub mod dynamic;
pub mod error;
pub mod marshal;
pub mod store;

// Re-export main types at crate root
pub use document::Document;
pub use dynamic::{ChildCount, StructureSummary, XmlMetadata, is_well_formed, metadata, parse_to_value};
pub use error::{DocumentError, XmlError};
pub use marshal::{from_xml, to_xml};
pub use store::DocumentStore;
