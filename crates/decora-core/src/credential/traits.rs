//! Injectable dependencies of the credential manager.
//!
//! The manager's behavior depends on wall-clock time, a persisted token
//! cache, and an identity provider; each is a trait so tests can drive the
//! state machine without real IO. Implementations live in decora-infra.

use chrono::{DateTime, Utc};

use decora_types::credential::StoredCredential;
use decora_types::error::CredentialError;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Persisted storage for the single named credential slot.
pub trait TokenCache: Send + Sync {
    /// Load the cached credential. `Ok(None)` when nothing is cached; an
    /// error when the cache exists but cannot be read or parsed.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<StoredCredential>, CredentialError>> + Send;

    /// Persist a credential, replacing any previous one.
    fn store(
        &self,
        credential: &StoredCredential,
    ) -> impl std::future::Future<Output = Result<(), CredentialError>> + Send;
}

/// The OAuth identity provider: token refresh and interactive
/// authorization.
pub trait IdentityClient: Send + Sync {
    /// Exchange a refresh token for a fresh credential.
    fn refresh(
        &self,
        refresh_token: &str,
    ) -> impl std::future::Future<Output = Result<StoredCredential, CredentialError>> + Send;

    /// Run the interactive loopback authorization flow and return the
    /// granted credential.
    fn authorize(
        &self,
    ) -> impl std::future::Future<Output = Result<StoredCredential, CredentialError>> + Send;
}
