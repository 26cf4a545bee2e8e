//! Error handling foundation for the xmldoc document manager.
//!
//! Only the `Result` type alias over rootcause lives here. Domain error
//! enums belong to the crates that own the domain (the document store's
//! `DocumentError`, for example) and travel through this alias, picking
//! up layer context via rootcause's `.context()` on the way up.

use rootcause::Report;

/// Result alias carrying a rootcause `Report` on the error side.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
