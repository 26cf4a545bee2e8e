//! Current-user session state for the xmldoc document manager.
//!
//! This crate provides [`Session`], the application-wide view of "who
//! is signed in". It is an explicitly-owned value: the application
//! creates one at startup, hands it (by reference) to whatever drives
//! the UI, and drops it at teardown. Nothing is persisted across
//! restarts beyond what the identity provider caches on its side.

pub mod store;

pub use store::Session;
