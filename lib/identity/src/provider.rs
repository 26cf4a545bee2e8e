//! The identity-provider capability.
//!
//! The external identity service is modeled as an injected trait so the
//! gateway can be exercised against a substitute implementation without
//! a live provider. The contract mirrors what the managed service
//! offers: credential sign-in, registration, confirmation-code
//! submission, sign-out, and queries for the current session's user and
//! token, each resolving with a value or rejecting with an error object
//! exposing a `code` field.

use crate::user::UserRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider code meaning "no one is currently signed in".
///
/// Session queries reject with this code when there is no cached
/// session. It is an expected condition, not a failure.
pub const NO_CURRENT_USER: &str = "NoCurrentUser";

/// An error rejected by the identity provider.
///
/// The `code` field is the provider's machine-readable error name
/// (e.g. `NotAuthorizedException`); it is the only part the gateway
/// inspects when mapping errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    code: String,
    message: String,
}

impl ProviderError {
    /// Creates a provider error with the given code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates the "no current session" rejection.
    #[must_use]
    pub fn no_session() -> Self {
        Self::new(NO_CURRENT_USER, "no current authenticated user")
    }

    /// Returns the provider's error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the provider's error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this rejection means "not signed in" rather
    /// than an actual failure.
    #[must_use]
    pub fn is_no_session(&self) -> bool {
        self.code == NO_CURRENT_USER
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ProviderError {}

/// The external identity provider contract.
///
/// Implementations perform the actual network round trips. The provider
/// owns whatever session state it needs (cached tokens); callers only
/// query it. All operations are terminal on failure: no retries.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchanges credentials for an authenticated user record.
    async fn sign_in(&self, username: &str, password: &str)
    -> Result<UserRecord, ProviderError>;

    /// Registers a new account. `email` is a required attribute.
    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<UserRecord, ProviderError>;

    /// Submits the out-of-band confirmation code for a new account.
    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), ProviderError>;

    /// Terminates the current session with the provider.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Queries the already-authenticated user, if any.
    ///
    /// Rejects with the [`NO_CURRENT_USER`] code when nobody is signed
    /// in.
    async fn current_user(&self) -> Result<UserRecord, ProviderError>;

    /// Fetches the current session's identity token.
    ///
    /// Rejects with the [`NO_CURRENT_USER`] code when nobody is signed
    /// in.
    async fn current_token(&self) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display_includes_code_and_message() {
        let err = ProviderError::new("TooManyRequestsException", "slow down");
        assert_eq!(err.to_string(), "TooManyRequestsException: slow down");
    }

    #[test]
    fn no_session_is_classified() {
        assert!(ProviderError::no_session().is_no_session());
        assert!(!ProviderError::new("NotAuthorizedException", "nope").is_no_session());
    }

    #[test]
    fn provider_error_serialization_roundtrip() {
        let err = ProviderError::new("UserNotFoundException", "no such user");
        let json = serde_json::to_string(&err).expect("serialize");
        let parsed: ProviderError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(err, parsed);
    }
}
