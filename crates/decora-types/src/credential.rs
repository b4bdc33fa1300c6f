//! OAuth credential record for the file-hosting integration.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A persisted OAuth credential for the Drive upload integration.
///
/// Loaded from the token cache file at request time and re-validated on every
/// use. `expiry` is the absolute instant the access token stops working;
/// `refresh_token` is absent for flows that did not grant offline access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expiry: DateTime<Utc>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredCredential {
    /// Whether the access token is past (or within `skew` of) its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        now + skew >= self.expiry
    }

    /// Structural validation of a loaded record. A cache entry that fails
    /// this check is treated the same as a missing one.
    pub fn is_well_formed(&self) -> bool {
        !self.access_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(expiry: DateTime<Utc>) -> StoredCredential {
        StoredCredential {
            access_token: "ya29.test".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expiry,
            scopes: vec!["https://www.googleapis.com/auth/drive.file".to_string()],
        }
    }

    #[test]
    fn test_expiry_with_skew() {
        let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let cred = sample(expiry);

        let well_before = expiry - Duration::hours(1);
        let just_inside_skew = expiry - Duration::seconds(30);

        assert!(!cred.is_expired(well_before, Duration::seconds(60)));
        assert!(cred.is_expired(just_inside_skew, Duration::seconds(60)));
        assert!(cred.is_expired(expiry, Duration::zero()));
    }

    #[test]
    fn test_well_formed_requires_access_token() {
        let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut cred = sample(expiry);
        assert!(cred.is_well_formed());
        cred.access_token.clear();
        assert!(!cred.is_well_formed());
    }

    #[test]
    fn test_serde_roundtrip() {
        let expiry = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let cred = sample(expiry);
        let json = serde_json::to_string(&cred).unwrap();
        let parsed: StoredCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cred);
    }

    #[test]
    fn test_missing_scopes_defaults_empty() {
        let json = r#"{"access_token":"t","expiry":"2025-06-01T12:00:00Z"}"#;
        let parsed: StoredCredential = serde_json::from_str(json).unwrap();
        assert!(parsed.refresh_token.is_none());
        assert!(parsed.scopes.is_empty());
    }
}
