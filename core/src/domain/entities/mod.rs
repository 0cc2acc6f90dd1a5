//! Domain entities representing core business objects.

pub mod subject;
pub mod token;

// Re-export commonly used types
pub use subject::{Credentials, Subject};
pub use token::{Claims, RevocationEntry, SignedToken, TokenPair, TokenPurpose};
