//! Business services containing the session core's logic.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::{
    bearer_token, RevocationSweeper, SessionCookies, SessionService, SessionTransport,
    SweeperConfig,
};
pub use token::{token_id, Signer};
