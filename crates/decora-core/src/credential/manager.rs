//! Credential manager state machine.
//!
//! Every `obtain` call walks the same explicit states, so validity is
//! re-checked per call and never trusted from a previous request:
//!
//! ```text
//! Probe ──(cached, fresh)──────────────────────▶ Valid
//!   │ ├──(cached, expired, refresh token)──▶ Refresh ──ok──▶ Valid
//!   │ │                                        │
//!   │ └──(absent / corrupt / malformed)──┐     └──err──┐
//!   └────────────────────────────────────┴─▶ Authorize ──▶ Valid
//! ```
//!
//! A fresh credential is persisted before it is returned, in both the
//! refresh and the authorize arm.

use chrono::Duration;
use tracing::{debug, info, warn};

use decora_types::credential::StoredCredential;
use decora_types::error::CredentialError;

use super::traits::{Clock, IdentityClient, TokenCache};

/// How long before actual expiry a token is already treated as expired.
const REFRESH_SKEW_SECONDS: i64 = 60;

/// States of one `obtain` pass.
enum Flow {
    Probe,
    Refresh(String),
    Authorize,
}

/// Obtains a valid credential for exactly one upload operation.
pub struct CredentialManager<C: Clock, T: TokenCache, I: IdentityClient> {
    clock: C,
    cache: T,
    identity: I,
}

impl<C: Clock, T: TokenCache, I: IdentityClient> CredentialManager<C, T, I> {
    pub fn new(clock: C, cache: T, identity: I) -> Self {
        Self {
            clock,
            cache,
            identity,
        }
    }

    /// Produce a valid credential, refreshing or re-authorizing as needed.
    ///
    /// Only authorization failure (and cache write failure for a fresh
    /// credential) is fatal; a corrupt cache or a failed refresh falls
    /// through to the interactive flow.
    pub async fn obtain(&self) -> Result<StoredCredential, CredentialError> {
        let mut state = Flow::Probe;

        loop {
            state = match state {
                Flow::Probe => match self.probe().await {
                    Ok(credential) => return Ok(credential),
                    Err(next) => next,
                },

                Flow::Refresh(refresh_token) => {
                    match self.identity.refresh(&refresh_token).await {
                        Ok(fresh) => {
                            self.cache.store(&fresh).await?;
                            info!("access token refreshed");
                            return Ok(fresh);
                        }
                        Err(err) => {
                            warn!(error = %err, "token refresh failed, falling back to authorization");
                            Flow::Authorize
                        }
                    }
                }

                Flow::Authorize => {
                    let fresh = self.identity.authorize().await?;
                    self.cache.store(&fresh).await?;
                    info!("interactive authorization completed");
                    return Ok(fresh);
                }
            };
        }
    }

    /// Inspect the cache and decide the next state. Returns the credential
    /// directly when the cached one is still valid.
    async fn probe(&self) -> Result<StoredCredential, Flow> {
        let cached = match self.cache.load().await {
            Ok(Some(credential)) if credential.is_well_formed() => credential,
            Ok(Some(_)) => {
                warn!("cached credential is malformed, treating as absent");
                return Err(Flow::Authorize);
            }
            Ok(None) => {
                debug!("no cached credential");
                return Err(Flow::Authorize);
            }
            Err(err) => {
                warn!(error = %err, "token cache unreadable, treating as absent");
                return Err(Flow::Authorize);
            }
        };

        let skew = Duration::seconds(REFRESH_SKEW_SECONDS);
        if !cached.is_expired(self.clock.now(), skew) {
            debug!("cached credential still valid");
            return Ok(cached);
        }

        match cached.refresh_token {
            Some(refresh_token) => Err(Flow::Refresh(refresh_token)),
            None => {
                debug!("expired credential without refresh token");
                Err(Flow::Authorize)
            }
        }
    }
}
