//! External identity capability.
//!
//! Authentication itself happens outside this layer; all the services need
//! is the identity the surrounding application has already established, to
//! seed the email-based profile lookup. Injecting the resolver keeps the
//! services free of ambient global state and lets tests substitute a fake.

use serde::{Deserialize, Serialize};

/// The externally-authenticated identity of the current caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Email address asserted by the authentication provider.
    pub email_address: String,
}

/// Resolves the caller's current identity, if any.
///
/// Resolution is synchronous: the surrounding application holds the session
/// state, so no I/O is involved.
pub trait IdentityResolver: Send + Sync {
    /// The current identity, or `None` when no one is signed in.
    fn current_identity(&self) -> Option<Identity>;
}
