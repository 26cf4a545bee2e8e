//! The authentication gateway.
//!
//! `AuthGateway` is the single choke point between the application and
//! the identity provider: raw provider rejections never escape it.
//! Credential operations surface mapped [`AuthError`]s; session queries
//! never fail and resolve to a [`Probe`] instead.

use crate::error::AuthError;
use crate::provider::{IdentityProvider, ProviderError};
use crate::user::UserRecord;
use tracing::{instrument, warn};

/// Outcome of a session query.
///
/// "Not signed in" is an expected condition and gets its own variant
/// rather than being collapsed into a failure. `Failed` carries the
/// provider error so callers that care (e.g. to retry a transient
/// outage) can tell it apart from `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// The provider returned a value.
    Present(T),
    /// No current session at the provider.
    Absent,
    /// The provider query failed for a reason other than "no session".
    Failed(ProviderError),
}

impl<T> Probe<T> {
    /// Returns true if the probe found a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Collapses the probe into an option, treating a failed query the
    /// same as an absent session.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Failed(_) => None,
        }
    }
}

/// Facade over the identity provider.
///
/// Stateless: every operation is a single request/response against the
/// provider. The only persistent session state is the provider's own,
/// which the gateway queries but does not model.
#[derive(Debug, Clone)]
pub struct AuthGateway<P> {
    provider: P,
}

impl<P: IdentityProvider> AuthGateway<P> {
    /// Creates a gateway over the given provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Signs in with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] when the provider rejects the
    /// credential exchange.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
        self.provider
            .sign_in(username, password)
            .await
            .map_err(AuthError::from)
    }

    /// Registers a new account with `email` as a required attribute.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] when registration is rejected.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<UserRecord, AuthError> {
        self.provider
            .sign_up(username, password, email)
            .await
            .map_err(AuthError::from)
    }

    /// Submits the out-of-band confirmation code for a new account.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] on an invalid or expired code.
    #[instrument(skip(self))]
    pub async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), AuthError> {
        self.provider
            .confirm_sign_up(username, code)
            .await
            .map_err(AuthError::from)
    }

    /// Terminates the current session with the provider.
    ///
    /// # Errors
    ///
    /// Returns the mapped [`AuthError`] when the provider rejects the
    /// sign-out.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await.map_err(AuthError::from)
    }

    /// Queries the currently authenticated user.
    ///
    /// Never fails: "not signed in" resolves to [`Probe::Absent`], and
    /// any other provider failure is logged and resolves to
    /// [`Probe::Failed`].
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Probe<UserRecord> {
        match self.provider.current_user().await {
            Ok(user) => Probe::Present(user),
            Err(err) if err.is_no_session() => Probe::Absent,
            Err(err) => {
                warn!(code = err.code(), "current-user query failed");
                Probe::Failed(err)
            }
        }
    }

    /// Fetches the current session's identity token.
    ///
    /// Same never-failing policy as [`Self::current_user`].
    #[instrument(skip(self))]
    pub async fn token(&self) -> Probe<String> {
        match self.provider.current_token().await {
            Ok(token) => Probe::Present(token),
            Err(err) if err.is_no_session() => Probe::Absent,
            Err(err) => {
                warn!(code = err.code(), "token query failed");
                Probe::Failed(err)
            }
        }
    }
}
