//! Token signing module
//!
//! The signer is the stateless cryptographic primitive under the session
//! lifecycle: it turns claims into compact signed tokens and back,
//! rejecting bad signatures and expired tokens before any business rule
//! gets a look at them.

mod signer;

pub use signer::{token_id, Signer};
