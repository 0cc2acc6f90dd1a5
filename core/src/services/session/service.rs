//! Session lifecycle service
//!
//! Drives the credential lifecycle from login through rotation to
//! logout. Verification order is fixed: signature and expiry first,
//! then purpose, then revocation state, then account state. An expired
//! token therefore reports `Expired` even when it was also revoked.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cr_shared::config::JwtConfig;

use crate::domain::entities::{Claims, Credentials, RevocationEntry, TokenPair, TokenPurpose};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{CredentialStore, RevocationStore};
use crate::services::token::{token_id, Signer};

/// Orchestrates login, authentication, token rotation and logout
///
/// Generic over the credential store and the revocation registry so the
/// same lifecycle runs against in-memory fixtures in tests and Redis in
/// deployment.
pub struct SessionService<C: CredentialStore, R: RevocationStore> {
    credentials: Arc<C>,
    revocations: Arc<R>,
    signer: Signer,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<C: CredentialStore, R: RevocationStore> SessionService<C, R> {
    /// Create a new session service
    ///
    /// # Errors
    ///
    /// Returns an error if the signing configuration is invalid.
    pub fn new(
        credentials: Arc<C>,
        revocations: Arc<R>,
        config: &JwtConfig,
    ) -> DomainResult<Self> {
        Ok(Self {
            credentials,
            revocations,
            signer: Signer::new(config)?,
            access_ttl: Duration::seconds(config.access_token_expiry),
            refresh_ttl: Duration::seconds(config.refresh_token_expiry),
        })
    }

    /// Authenticate credentials and open a new session
    ///
    /// Unknown usernames, wrong passwords and deactivated accounts all
    /// fail with [`AuthError::InvalidCredentials`] so the response never
    /// reveals which check rejected the attempt.
    ///
    /// # Returns
    /// A fresh access/refresh token pair on success.
    pub async fn login(&self, credentials: &Credentials) -> DomainResult<TokenPair> {
        let subject = match self.credentials.lookup(credentials).await? {
            Some(subject) if subject.is_active => subject,
            Some(_) => {
                debug!("Login rejected: account deactivated");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                debug!("Login rejected: unknown username or wrong password");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let pair = self.issue_pair(subject.id).await?;

        info!(subject = %subject.id, "Session opened");
        Ok(pair)
    }

    /// Validate an access token and resolve the subject it belongs to
    ///
    /// Purely local: no store is consulted, which is what makes access
    /// checks cheap and also why revocation cannot reach tokens of this
    /// purpose before they expire.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<Uuid> {
        let claims = self.verify_purpose(access_token, TokenPurpose::Access)?;
        let subject = claims
            .subject_id()
            .map_err(|_| DomainError::from(TokenError::Malformed))?;
        Ok(subject)
    }

    /// Authenticate whatever credential the transport extracted, if any
    ///
    /// The cookie transport reports a missing cookie as `None` rather
    /// than an error; here that becomes
    /// [`AuthError::Unauthenticated`], the same coarse outcome every
    /// other verification failure collapses to at the boundary.
    pub async fn authenticate_request(&self, access_token: Option<&str>) -> DomainResult<Uuid> {
        match access_token {
            Some(token) => self.authenticate(token).await,
            None => {
                debug!("Request carried no access credential");
                Err(AuthError::Unauthenticated.into())
            }
        }
    }

    /// Rotate a refresh token, returning a fresh token pair
    ///
    /// The old token is retired by a conditional insert into the
    /// revocation registry; losing that insert means another caller
    /// already spent this token, which is treated as reuse. On reuse
    /// the subject's current chain head is revoked as well, forcing a
    /// fresh login everywhere.
    ///
    /// # Errors
    ///
    /// * [`TokenError::Expired`] / [`TokenError::InvalidSignature`] /
    ///   [`TokenError::Malformed`] - the presented token failed verification
    /// * [`TokenError::WrongPurpose`] - an access token was presented
    /// * [`TokenError::RefreshReused`] - the token was already spent
    /// * [`TokenError::SubjectInactive`] - the account was deactivated
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.verify_purpose(refresh_token, TokenPurpose::Refresh)?;
        let subject = claims
            .subject_id()
            .map_err(|_| DomainError::from(TokenError::Malformed))?;
        let id = token_id(refresh_token);

        if self.revocations.is_revoked(&id).await? {
            return self.reuse_detected(subject).await;
        }

        if !self.credentials.is_active(subject).await? {
            debug!(subject = %subject, "Refresh rejected: account deactivated");
            return Err(TokenError::SubjectInactive.into());
        }

        // Spending the old token and winning the rotation race are the
        // same operation; the registry's storage medium provides the
        // exclusivity, not an in-process lock.
        let spent = RevocationEntry::new(&id, subject, claims.expires_at());
        if !self.revocations.insert_if_absent(spent).await? {
            return self.reuse_detected(subject).await;
        }

        let pair = self.issue_pair(subject).await?;

        debug!(subject = %subject, "Refresh token rotated");
        Ok(pair)
    }

    /// Close a session by revoking its refresh token
    ///
    /// Revoking an already-revoked token succeeds; presenting an expired
    /// token also succeeds, since expiry already ends the session. A
    /// forged or malformed token is still an error.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let claims = match self.signer.verify(refresh_token) {
            Ok(claims) => claims,
            // The session this token represented is already over.
            Err(TokenError::Expired) => return Ok(()),
            Err(e) => {
                debug!("Logout rejected: {e}");
                return Err(e.into());
            }
        };

        if claims.purpose != TokenPurpose::Refresh {
            return Err(TokenError::WrongPurpose {
                expected: TokenPurpose::Refresh,
            }
            .into());
        }

        let subject = claims
            .subject_id()
            .map_err(|_| DomainError::from(TokenError::Malformed))?;

        let entry = RevocationEntry::new(&token_id(refresh_token), subject, claims.expires_at());
        self.revocations.revoke(entry).await?;

        info!(subject = %subject, "Session closed");
        Ok(())
    }

    /// Issue a fresh access/refresh pair and record the new chain head
    async fn issue_pair(&self, subject: Uuid) -> DomainResult<TokenPair> {
        let access = self
            .signer
            .issue(subject, TokenPurpose::Access, self.access_ttl)?;
        let refresh = self
            .signer
            .issue(subject, TokenPurpose::Refresh, self.refresh_ttl)?;

        let head = RevocationEntry::new(&token_id(&refresh.raw), subject, refresh.claims.expires_at());
        self.revocations.record_issued(subject, head).await?;

        Ok(TokenPair::new(
            access.raw,
            refresh.raw,
            self.access_ttl.num_seconds(),
            self.refresh_ttl.num_seconds(),
        ))
    }

    /// Handle a spent refresh token being presented again
    ///
    /// The reused token tells us its chain was compromised but not who
    /// holds the live head, so the head is revoked too.
    async fn reuse_detected(&self, subject: Uuid) -> DomainResult<TokenPair> {
        warn!(subject = %subject, "Refresh token reuse detected, revoking active chain");

        if let Some(head) = self.revocations.issued_for(subject).await? {
            self.revocations.revoke(head).await?;
        }

        Err(TokenError::RefreshReused.into())
    }

    fn verify_purpose(&self, raw_token: &str, expected: TokenPurpose) -> DomainResult<Claims> {
        let claims = self.signer.verify(raw_token)?;
        if claims.purpose != expected {
            return Err(TokenError::WrongPurpose { expected }.into());
        }
        Ok(claims)
    }
}
