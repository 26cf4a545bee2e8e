//! Core domain types and error handling for the xmldoc platform.
//!
//! This crate provides the foundational types shared by the xmldoc
//! document manager: the `Result` alias for layered error propagation
//! and the strongly-typed entity IDs. Domain-specific error types live
//! in the crates that own the domain.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::DocumentId;
