//! Record gateway contract.
//!
//! The record store is an opaque capability: execute a declarative query or
//! command against a named collection, get back a uniform envelope
//! `{success, data|results, message}`. This module defines that contract
//! ([`RecordGateway`]), the raw record shape, and the envelope types; the
//! HTTP implementation lives in [`http`]. Services validate the envelope -
//! the gateway only fails on transport-level problems.

mod http;

pub use http::HttpRecordGateway;

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::query::Query;

/// Errors that can occur talking to the record store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Envelope JSON could not be parsed.
    #[error("invalid envelope: {0}")]
    Parse(#[from] serde_json::Error),

    /// The store returned a non-success HTTP status.
    #[error("record store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Rate limited by the store.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The gateway capability could not be initialized.
    #[error("record gateway unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Raw records
// =============================================================================

/// An untyped record as returned by the record store.
///
/// Field names are opaque string keys; the store marks its custom columns
/// with a `_c` suffix (see [`crate::schema`]). Values are arbitrary JSON -
/// the transformers in [`crate::conversions`] own all coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// Envelope for a multi-record read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for a single-record read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope for a create/update command.
///
/// `results` is order-correlated with the submitted records; a `true`
/// top-level `success` does not imply every record succeeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecordResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-record outcome within a [`WriteEnvelope`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Gateway contract
// =============================================================================

/// Executes declarative queries and commands against the record store.
///
/// Implementations fail only on transport-level problems; an operation the
/// store itself rejected still resolves, with `success: false` and a
/// message in the envelope.
pub trait RecordGateway: Send + Sync {
    /// Fetch the records of `collection` matching `query`.
    fn fetch_records(
        &self,
        collection: &str,
        query: &Query,
    ) -> impl Future<Output = Result<FetchEnvelope, GatewayError>> + Send;

    /// Fetch one record of `collection` by its store-assigned id.
    fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &Query,
    ) -> impl Future<Output = Result<RecordEnvelope, GatewayError>> + Send;

    /// Create the given records in `collection`.
    fn create_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> impl Future<Output = Result<WriteEnvelope, GatewayError>> + Send;

    /// Update the given records (matched by their `Id` field) in `collection`.
    fn update_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> impl Future<Output = Result<WriteEnvelope, GatewayError>> + Send;
}
