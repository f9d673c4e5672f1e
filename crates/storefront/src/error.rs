//! Domain-level error type for the data-access layer.
//!
//! Transport and envelope-parse failures live in
//! [`GatewayError`](crate::gateway::GatewayError); this type is what the
//! services surface to the rest of the application. List and search reads
//! never produce `NotFound` or `Validation` - they degrade store-reported
//! failure to an empty list instead (see the service docs).

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors surfaced by the domain services.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record gateway failed at the transport level.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// No external identity is present.
    #[error("not authenticated")]
    Unauthenticated,

    /// The authenticated identity has no profile record in the store.
    #[error("user profile not found")]
    ProfileNotFound,

    /// The entity is absent, or exists but is not owned by the caller.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store rejected a write; carries the first failed record's message.
    #[error("{0}")]
    Validation(String),
}
