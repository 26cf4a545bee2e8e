//! Error types for the identity crate.
//!
//! Provider rejections are mapped through a fixed code table into
//! `AuthError`. The four enumerated codes become fixed, user-displayable
//! messages; every other code passes through unchanged so upstream
//! diagnostics keep the original error identity.

use crate::provider::ProviderError;
use std::fmt;

/// An authentication error surfaced to callers of the gateway.
///
/// The mapped variants carry fixed messages intended for direct user
/// display. `Provider` is the identity-preserving pass-through for
/// every unrecognized provider code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Provider code `UserNotFoundException`.
    UserNotFound,
    /// Provider code `NotAuthorizedException`.
    NotAuthorized,
    /// Provider code `UserNotConfirmedException`.
    UserNotConfirmed,
    /// Provider code `UsernameExistsException`.
    UsernameExists,
    /// Any other provider error, passed through unchanged.
    Provider(ProviderError),
}

impl AuthError {
    /// Returns the original provider error for pass-through variants.
    #[must_use]
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err.code() {
            "UserNotFoundException" => Self::UserNotFound,
            "NotAuthorizedException" => Self::NotAuthorized,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "UsernameExistsException" => Self::UsernameExists,
            _ => Self::Provider(err),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserNotFound => write!(f, "User not found"),
            Self::NotAuthorized => write!(f, "Incorrect username or password"),
            Self::UserNotConfirmed => write!(f, "Please confirm your account"),
            Self::UsernameExists => write!(f, "Username already exists"),
            Self::Provider(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_not_found_maps_to_fixed_message() {
        let err = AuthError::from(ProviderError::new("UserNotFoundException", "raw"));
        assert_eq!(err, AuthError::UserNotFound);
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn not_authorized_maps_to_fixed_message() {
        let err = AuthError::from(ProviderError::new("NotAuthorizedException", "raw"));
        assert_eq!(err, AuthError::NotAuthorized);
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[test]
    fn user_not_confirmed_maps_to_fixed_message() {
        let err = AuthError::from(ProviderError::new("UserNotConfirmedException", "raw"));
        assert_eq!(err, AuthError::UserNotConfirmed);
        assert_eq!(err.to_string(), "Please confirm your account");
    }

    #[test]
    fn username_exists_maps_to_fixed_message() {
        let err = AuthError::from(ProviderError::new("UsernameExistsException", "raw"));
        assert_eq!(err, AuthError::UsernameExists);
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[test]
    fn unrecognized_code_passes_through_unchanged() {
        let original = ProviderError::new("TooManyRequestsException", "rate exceeded");
        let err = AuthError::from(original.clone());

        assert_eq!(err.as_provider(), Some(&original));
        assert_eq!(err.to_string(), "TooManyRequestsException: rate exceeded");
    }

    #[test]
    fn mapped_variants_have_no_provider_error() {
        assert!(AuthError::UserNotFound.as_provider().is_none());
    }
}
