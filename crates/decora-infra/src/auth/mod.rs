//! Google OAuth integration: client secret, token cache, identity client.
//!
//! Implements the core `TokenCache` and `IdentityClient` traits: a
//! JSON-file token cache and an identity client that refreshes tokens at
//! the Google token endpoint and runs the interactive loopback
//! authorization flow.

pub mod client_secret;
pub mod oauth;
pub mod token_cache;

pub use client_secret::ClientSecret;
pub use oauth::GoogleAuthClient;
pub use token_cache::FileTokenCache;
