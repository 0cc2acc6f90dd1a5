//! Session lifecycle module
//!
//! Owns the four lifecycle operations (login, authenticate, refresh,
//! logout), the cookie transport that carries tokens across HTTP, and
//! the background sweeper that bounds the revocation registry.

mod service;
mod sweeper;
mod transport;

#[cfg(test)]
mod tests;

pub use service::SessionService;
pub use sweeper::{RevocationSweeper, SweeperConfig};
pub use transport::{bearer_token, SessionCookies, SessionTransport};
