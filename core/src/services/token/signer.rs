//! Stateless JWT signer for session credentials.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use cr_shared::config::JwtConfig;

use crate::domain::entities::{Claims, SignedToken, TokenPurpose};
use crate::errors::{DomainError, TokenError};

/// Signs and verifies compact, self-contained credential tokens
///
/// The signer is pure apart from reading the clock: issuing has no
/// observable side effect beyond the returned token, and verification
/// touches no state. The secret key is process-wide configuration loaded
/// once at startup; rotating it invalidates every outstanding token,
/// which is an operational consequence, not a bug.
pub struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: String,
}

impl Signer {
    /// Creates a signer from the JWT configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured algorithm name is unknown.
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = config
            .algorithm
            .parse::<Algorithm>()
            .map_err(|_| DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {}", config.algorithm),
            })?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        // Second-exact expiry; the default 60s leeway would let an
        // expired token through.
        validation.leeway = 0;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            algorithm,
            issuer: config.issuer.clone(),
        })
    }

    /// Issues a signed token for the subject
    ///
    /// Claims carry `iat = now` and `exp = now + ttl`, both UTC seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::GenerationFailed`] if encoding fails.
    pub fn issue(
        &self,
        subject: Uuid,
        purpose: TokenPurpose,
        ttl: chrono::Duration,
    ) -> Result<SignedToken, TokenError> {
        let claims = Claims::new(subject, purpose, ttl, &self.issuer);

        let raw = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok(SignedToken { raw, claims })
    }

    /// Verifies a raw token and returns its claims
    ///
    /// Signature and expiry are rejected here, before any purpose or
    /// revocation rule runs, so the failure path has the same shape for
    /// every bad token.
    ///
    /// # Errors
    ///
    /// * [`TokenError::Expired`] - `exp` has been reached (valid signature)
    /// * [`TokenError::InvalidSignature`] - signature mismatch
    /// * [`TokenError::Malformed`] - anything else that fails to decode
    pub fn verify(&self, raw_token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(raw_token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        // The library's exp check is exclusive (`exp < now`); a token in
        // its final second would slip through. Expiry here is inclusive:
        // `now >= exp` is expired.
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Derives the revocation identity of a token from its raw encoding
///
/// SHA-256 of the compact form, so the registry never stores a usable
/// credential.
pub fn token_id(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    hex::encode(hasher.finalize())
}
