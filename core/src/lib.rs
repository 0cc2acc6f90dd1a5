//! # Chatrooms Core
//!
//! Authentication and session-lifecycle core for the Chatrooms backend.
//! This crate contains the credential token entities, the signer, the
//! session lifecycle service (issuance, verification, rotation and
//! revocation), the cookie transport, and the repository interfaces the
//! surrounding application implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, Credentials, RevocationEntry, SignedToken, Subject, TokenPair, TokenPurpose,
};
pub use errors::{AuthError, DomainError, DomainResult, ErrorResponse, TokenError};
pub use repositories::{CredentialStore, MemoryRevocationStore, RevocationStore};
pub use services::{
    bearer_token, token_id, RevocationSweeper, SessionCookies, SessionService, SessionTransport,
    Signer, SweeperConfig,
};
