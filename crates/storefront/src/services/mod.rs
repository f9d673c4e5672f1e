//! Domain services.
//!
//! Each service orchestrates the query builder, the record gateway, and the
//! conversions for one entity, and exposes the stable domain API the rest
//! of the application consumes. Services are stateless: every call
//! re-resolves its own context (including the caller's profile) rather than
//! caching it, trading redundant round trips for freedom from stale-session
//! bugs.
//!
//! Error policy: list and search reads degrade store-reported failure to an
//! empty list, so catalog views stay resilient; single-entity reads and all
//! writes fail loudly with a typed [`StoreError`].

mod orders;
mod products;
mod users;

pub use orders::OrderService;
pub use products::ProductService;
pub use users::UserService;

use crate::error::StoreError;
use crate::gateway::{FetchEnvelope, RawRecord, WriteEnvelope};

/// Unwrap a list read, degrading store-reported failure to an empty list.
fn records_or_empty(envelope: FetchEnvelope, collection: &str) -> Vec<RawRecord> {
    if envelope.success {
        envelope.data.unwrap_or_default()
    } else {
        tracing::debug!(
            collection,
            message = envelope.message.as_deref().unwrap_or(""),
            "list read failed, degrading to empty"
        );
        Vec::new()
    }
}

/// Validate a write envelope including its per-record results.
///
/// Any failed record aborts the whole operation with that record's message,
/// even when a sibling in the same batch succeeded.
fn check_write(envelope: &WriteEnvelope, fallback: &str) -> Result<(), StoreError> {
    if !envelope.success {
        return Err(StoreError::Validation(
            envelope
                .message
                .clone()
                .unwrap_or_else(|| fallback.to_owned()),
        ));
    }
    if let Some(results) = &envelope.results
        && let Some(failed) = results.iter().find(|r| !r.success)
    {
        tracing::error!(
            message = failed.message.as_deref().unwrap_or(""),
            "record write rejected by store"
        );
        return Err(StoreError::Validation(
            failed
                .message
                .clone()
                .unwrap_or_else(|| fallback.to_owned()),
        ));
    }
    Ok(())
}
