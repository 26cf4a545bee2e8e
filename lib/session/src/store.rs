//! The owned session state object.
//!
//! `Session` tracks the current authenticated user and a loading flag
//! for the initial fetch. It is mutated only through `&mut self`, so a
//! single owner drives all state changes and no locking is needed.

use tracing::warn;
use xmldoc_identity::{AuthGateway, IdentityProvider, Probe, UserRecord};

/// Clears the loading flag when dropped.
///
/// Keeps the flag from sticking at `true` even if the initial fetch is
/// cancelled mid-await.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Application-wide view of the current authenticated user.
///
/// Created at startup, initialized once against the identity provider,
/// and dropped at teardown. Whether someone is signed in is derived
/// from the presence of a user record on every read; there is no
/// separate flag to fall out of sync.
#[derive(Debug)]
pub struct Session<P> {
    gateway: AuthGateway<P>,
    user: Option<UserRecord>,
    loading: bool,
}

impl<P: IdentityProvider> Session<P> {
    /// Creates an empty session over the given gateway.
    #[must_use]
    pub fn new(gateway: AuthGateway<P>) -> Self {
        Self {
            gateway,
            user: None,
            loading: false,
        }
    }

    /// Returns the gateway, for credential operations (sign-in,
    /// sign-up, confirmation) that the UI drives directly.
    #[must_use]
    pub fn gateway(&self) -> &AuthGateway<P> {
        &self.gateway
    }

    /// Returns the current user record, if someone is signed in.
    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    /// Returns true while the initial current-user fetch is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true if a user is signed in. Derived from the user
    /// record on every read.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Fetches the current user from the provider and stores it.
    ///
    /// Never fails: an absent session or a provider failure both leave
    /// the session in the signed-out state, with the failure logged.
    /// The loading flag is cleared once the fetch settles, whatever
    /// the outcome.
    pub async fn initialize(&mut self) {
        let guard = LoadingGuard::begin(&mut self.loading);
        self.user = match self.gateway.current_user().await {
            Probe::Present(user) => Some(user),
            Probe::Absent => None,
            Probe::Failed(err) => {
                warn!(code = err.code(), "failed to initialize session");
                None
            }
        };
        drop(guard);
    }

    /// Signs out at the provider and clears the current user.
    ///
    /// On provider failure the user is left unchanged; the local state
    /// then reports a session the provider may already have dropped.
    pub async fn sign_out(&mut self) {
        match self.gateway.sign_out().await {
            Ok(()) => self.user = None,
            Err(err) => {
                warn!(error = %err, "failed to sign out");
            }
        }
    }
}
