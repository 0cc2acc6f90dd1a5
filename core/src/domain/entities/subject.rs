//! Subject entity: the identity a credential token is bound to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated identity known to the credential store
///
/// The session core binds tokens to the subject ID only; everything else
/// here is carried for the application's convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier
    pub id: Uuid,

    /// Login name
    pub username: String,

    /// Whether the account may authenticate and refresh
    pub is_active: bool,
}

impl Subject {
    /// Creates a new active subject
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_active: true,
        }
    }
}

/// Login credentials presented to the credential store
///
/// The password is never logged or embedded in tokens; it exists only for
/// the duration of the lookup.
#[derive(Clone)]
pub struct Credentials {
    /// Login name
    pub username: String,

    /// Plaintext secret, verified by the credential store
    pub password: String,
}

impl Credentials {
    /// Creates a new credentials value
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
