//! GoogleAuthClient -- concrete [`IdentityClient`] implementation.
//!
//! Two paths to a fresh credential: a silent refresh against the token
//! endpoint, and the interactive loopback flow (a local TCP listener
//! receives the OAuth redirect, the code is exchanged at the token
//! endpoint). The operator must open the printed URL in a browser for the
//! interactive path.

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

use decora_core::credential::IdentityClient;
use decora_types::credential::StoredCredential;
use decora_types::error::CredentialError;

use super::client_secret::ClientSecret;

/// Scope granted to uploaded-file management.
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// Response from the OAuth token endpoint, for both grant types.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Seconds until expiry.
    expires_in: i64,
    /// Present on first authorization; refresh responses usually omit it.
    refresh_token: Option<String>,
    /// Space-separated granted scopes.
    scope: Option<String>,
}

impl TokenResponse {
    fn into_credential(self, fallback_refresh_token: Option<String>) -> StoredCredential {
        StoredCredential {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(fallback_refresh_token),
            expiry: Utc::now() + Duration::seconds(self.expires_in),
            scopes: self
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// Google OAuth client over a provisioned [`ClientSecret`].
pub struct GoogleAuthClient {
    client: reqwest::Client,
    secret: ClientSecret,
    scopes: Vec<String>,
}

impl GoogleAuthClient {
    pub fn new(secret: ClientSecret) -> Self {
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            secret,
            scopes: vec![DRIVE_FILE_SCOPE.to_string()],
        }
    }

    /// POST to the token endpoint; `wrap` turns failure text into the
    /// stage-appropriate error variant.
    async fn exchange(
        &self,
        params: &[(&str, &str)],
        wrap: fn(String) -> CredentialError,
    ) -> Result<TokenResponse, CredentialError> {
        let response = self
            .client
            .post(&self.secret.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| wrap(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(wrap(format!("HTTP {status}: {text}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| wrap(format!("malformed token response: {e}")))
    }

    /// Wait for the OAuth redirect on the loopback listener and extract the
    /// authorization code from its query string.
    async fn receive_code(listener: TcpListener) -> Result<String, CredentialError> {
        let (mut stream, _addr) = listener
            .accept()
            .await
            .map_err(|e| CredentialError::AuthorizationFailed(format!("loopback accept: {e}")))?;

        let mut buf = vec![0u8; 4096];
        let n = stream
            .read(&mut buf)
            .await
            .map_err(|e| CredentialError::AuthorizationFailed(format!("loopback read: {e}")))?;
        let request = String::from_utf8_lossy(&buf[..n]);

        let code = parse_redirect_code(&request);

        // Answer the browser either way, then surface the result.
        let body = match &code {
            Ok(_) => "Authorization complete. You can close this window.",
            Err(_) => "Authorization failed. You can close this window.",
        };
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(reply.as_bytes()).await;

        code
    }
}

/// Pull the `code` parameter out of the redirect's request line.
fn parse_redirect_code(request: &str) -> Result<String, CredentialError> {
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| {
            CredentialError::AuthorizationFailed("malformed redirect request".to_string())
        })?;

    let url = Url::parse(&format!("http://127.0.0.1{path}")).map_err(|e| {
        CredentialError::AuthorizationFailed(format!("malformed redirect path: {e}"))
    })?;

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => {
                return Err(CredentialError::AuthorizationFailed(format!(
                    "provider returned error: {value}"
                )));
            }
            _ => {}
        }
    }
    code.ok_or_else(|| {
        CredentialError::AuthorizationFailed("redirect carried no authorization code".to_string())
    })
}

impl IdentityClient for GoogleAuthClient {
    async fn refresh(&self, refresh_token: &str) -> Result<StoredCredential, CredentialError> {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .exchange(&params, CredentialError::RefreshFailed)
            .await?;
        Ok(response.into_credential(Some(refresh_token.to_string())))
    }

    async fn authorize(&self) -> Result<StoredCredential, CredentialError> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.map_err(|e| {
            CredentialError::AuthorizationFailed(format!("loopback bind: {e}"))
        })?;
        let port = listener
            .local_addr()
            .map_err(|e| CredentialError::AuthorizationFailed(format!("loopback addr: {e}")))?
            .port();
        let redirect_uri = format!("http://127.0.0.1:{port}");

        let mut auth_url = Url::parse(&self.secret.auth_uri).map_err(|e| {
            CredentialError::AuthorizationFailed(format!("malformed auth_uri: {e}"))
        })?;
        auth_url
            .query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.secret.client_id)
            .append_pair("redirect_uri", &redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");

        info!(%redirect_uri, "waiting for OAuth redirect");
        println!("Open this URL in your browser to authorize Drive uploads:\n{auth_url}");

        let code = Self::receive_code(listener).await?;

        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .exchange(&params, CredentialError::AuthorizationFailed)
            .await?;
        Ok(response.into_credential(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_redirect_code() {
        let request = "GET /?state=x&code=4%2FabcDEF&scope=drive.file HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n";
        assert_eq!(parse_redirect_code(request).unwrap(), "4/abcDEF");
    }

    #[test]
    fn test_parse_redirect_error() {
        let request = "GET /?error=access_denied HTTP/1.1\r\n\r\n";
        let err = parse_redirect_code(request).unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_parse_redirect_without_code() {
        let request = "GET /favicon.ico HTTP/1.1\r\n\r\n";
        assert!(parse_redirect_code(request).is_err());
    }

    #[test]
    fn test_token_response_keeps_old_refresh_token() {
        let response = TokenResponse {
            access_token: "ya29.fresh".to_string(),
            expires_in: 3600,
            refresh_token: None,
            scope: Some(DRIVE_FILE_SCOPE.to_string()),
        };

        let credential = response.into_credential(Some("1//old".to_string()));
        assert_eq!(credential.refresh_token.as_deref(), Some("1//old"));
        assert_eq!(credential.scopes, vec![DRIVE_FILE_SCOPE.to_string()]);
        assert!(credential.expiry > Utc::now());
    }

    #[test]
    fn test_token_response_prefers_new_refresh_token() {
        let response = TokenResponse {
            access_token: "ya29.fresh".to_string(),
            expires_in: 3600,
            refresh_token: Some("1//new".to_string()),
            scope: None,
        };

        let credential = response.into_credential(Some("1//old".to_string()));
        assert_eq!(credential.refresh_token.as_deref(), Some("1//new"));
        assert!(credential.scopes.is_empty());
    }
}
