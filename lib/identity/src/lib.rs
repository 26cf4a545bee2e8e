//! Identity-provider gateway for the xmldoc document manager.
//!
//! This crate provides:
//! - The `IdentityProvider` capability trait modeling the external
//!   identity service (credential exchange, registration, session and
//!   token queries)
//! - `AuthGateway`, the single choke point through which the rest of
//!   the application talks to the provider
//! - `AuthError`, the mapped error type with user-displayable messages
//! - `CognitoProvider`, the concrete provider over the AWS Cognito
//!   user-pool API
//!
//! # Error policy
//!
//! Sign-in, sign-up, confirmation, and sign-out surface failures to the
//! caller as [`AuthError`]: four well-known provider codes map to fixed
//! user-displayable messages, and everything else passes through with
//! its original code and message intact. Session queries
//! (`current_user`, `token`) never fail; they resolve to a three-valued
//! [`Probe`] so callers can tell "not signed in" apart from "provider
//! unreachable".
//!
//! # Example
//!
//! ```
//! use xmldoc_identity::{AuthError, ProviderError};
//!
//! let err = AuthError::from(ProviderError::new(
//!     "NotAuthorizedException",
//!     "Incorrect username or password.",
//! ));
//! assert_eq!(err.to_string(), "Incorrect username or password");
//! ```

pub mod cognito;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod user;

// Re-export main types at crate root
pub use cognito::{CognitoConfig, CognitoProvider};
pub use error::AuthError;
pub use gateway::{AuthGateway, Probe};
pub use provider::{IdentityProvider, ProviderError};
pub use user::UserRecord;
