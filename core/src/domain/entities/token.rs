//! Token entities for the JWT-based session core.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a token is allowed to be used for
///
/// A token of one purpose is never accepted where the other is required;
/// the lifecycle service enforces this after signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Short-lived credential authorizing individual requests
    Access,
    /// Long-lived credential used solely to obtain a new token pair
    Refresh,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPurpose::Access => write!(f, "access"),
            TokenPurpose::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token purpose (access or refresh)
    pub purpose: TokenPurpose,

    /// Issued at timestamp (UTC seconds)
    pub iat: i64,

    /// Expiration timestamp (UTC seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for the given subject and purpose
    ///
    /// `issued_at` is the current server time; the expiry is
    /// `issued_at + ttl`. A fresh `jti` makes every token unique even
    /// when issued within the same second.
    pub fn new(subject: Uuid, purpose: TokenPurpose, ttl: chrono::Duration, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: subject.to_string(),
            purpose,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired against the server clock
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the subject ID from the claims
    pub fn subject_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiration timestamp as a `DateTime<Utc>`
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// A signed token: the wire encoding plus the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    /// Compact JWT encoding
    pub raw: String,

    /// Claims embedded in the token
    pub claims: Claims,
}

/// Token pair returned to the client
///
/// Access and refresh tokens are issued together for the same subject;
/// the access expiry is strictly shorter than the refresh expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            access_expires_in,
            refresh_expires_in,
        }
    }
}

/// Revocation registry record for a refresh token
///
/// Keyed by the token identity (SHA-256 of the raw encoding). Entries are
/// never mutated and are removed only by expiry-driven sweeps: once
/// `expires_at` has passed, the token can no longer pass signature
/// verification, so keeping the entry would serve no purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// Token identity the entry is keyed by
    pub token_id: String,

    /// Subject the token was issued to
    pub subject: Uuid,

    /// Timestamp when the token itself expires
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Creates a new revocation entry
    pub fn new(token_id: impl Into<String>, subject: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_id: token_id.into(),
            subject,
            expires_at,
        }
    }

    /// Checks whether the underlying token has expired, making the entry
    /// eligible for sweeping
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_claims() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TokenPurpose::Access, Duration::seconds(1800), "chatrooms");

        assert_eq!(claims.sub, subject.to_string());
        assert_eq!(claims.purpose, TokenPurpose::Access);
        assert_eq!(claims.iss, "chatrooms");
        assert_eq!(claims.exp - claims.iat, 1800);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_claims() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TokenPurpose::Refresh, Duration::days(30), "chatrooms");

        assert_eq!(claims.purpose, TokenPurpose::Refresh);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_subject_id_parsing() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TokenPurpose::Access, Duration::seconds(30), "chatrooms");

        assert_eq!(claims.subject_id().unwrap(), subject);
    }

    #[test]
    fn test_claims_expiration() {
        let subject = Uuid::new_v4();
        let mut claims = Claims::new(subject, TokenPurpose::Access, Duration::seconds(30), "chatrooms");

        // Set expiration to past
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_purpose_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenPurpose::Access).unwrap(),
            r#""access""#
        );
        assert_eq!(
            serde_json::to_string(&TokenPurpose::Refresh).unwrap(),
            r#""refresh""#
        );
    }

    #[test]
    fn test_claims_serialization_round_trip() {
        let subject = Uuid::new_v4();
        let claims = Claims::new(subject, TokenPurpose::Refresh, Duration::days(30), "chatrooms");

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }

    #[test]
    fn test_revocation_entry_expiry() {
        let entry = RevocationEntry::new(
            "token-id",
            Uuid::new_v4(),
            Utc::now() + Duration::hours(1),
        );

        assert!(!entry.is_expired_at(Utc::now()));
        assert!(entry.is_expired_at(Utc::now() + Duration::hours(2)));
        // Boundary: an entry expiring exactly now is sweepable.
        assert!(entry.is_expired_at(entry.expires_at));
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new("access_jwt", "refresh_jwt", 1800, 2_592_000);

        assert_eq!(pair.access_token, "access_jwt");
        assert_eq!(pair.refresh_token, "refresh_jwt");
        assert!(pair.access_expires_in < pair.refresh_expires_in);
    }
}
