//! Shared test doubles: a scripted record gateway and a fixed identity.

#![allow(dead_code)] // not every test file uses every helper
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use velvet_outlet_storefront::gateway::{
    FetchEnvelope, GatewayError, RawRecord, RecordEnvelope, RecordGateway, RecordResult,
    WriteEnvelope,
};
use velvet_outlet_storefront::identity::{Identity, IdentityResolver};
use velvet_outlet_storefront::query::Query;

/// Install a subscriber once so `RUST_LOG` surfaces the layer's tracing
/// output during test runs.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One observed gateway invocation, with the query as wire JSON.
#[derive(Debug, Clone)]
pub enum GatewayCall {
    Fetch {
        collection: String,
        query: Value,
    },
    GetById {
        collection: String,
        id: i64,
        query: Value,
    },
    Create {
        collection: String,
        records: Vec<RawRecord>,
    },
    Update {
        collection: String,
        records: Vec<RawRecord>,
    },
}

/// Gateway double that replays scripted envelopes in FIFO order and records
/// every call. An exhausted queue yields a `success: false` envelope, the
/// store's shape for an operation it could not serve.
#[derive(Default)]
pub struct FakeGateway {
    fetches: Mutex<VecDeque<FetchEnvelope>>,
    lookups: Mutex<VecDeque<RecordEnvelope>>,
    writes: Mutex<VecDeque<WriteEnvelope>>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        init_tracing();
        Arc::new(Self::default())
    }

    pub fn queue_fetch(&self, envelope: FetchEnvelope) {
        self.fetches.lock().unwrap().push_back(envelope);
    }

    pub fn queue_lookup(&self, envelope: RecordEnvelope) {
        self.lookups.lock().unwrap().push_back(envelope);
    }

    pub fn queue_write(&self, envelope: WriteEnvelope) {
        self.writes.lock().unwrap().push_back(envelope);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecordGateway for FakeGateway {
    async fn fetch_records(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<FetchEnvelope, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Fetch {
            collection: collection.to_owned(),
            query: serde_json::to_value(query).unwrap(),
        });
        Ok(self.fetches.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordEnvelope, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::GetById {
            collection: collection.to_owned(),
            id,
            query: serde_json::to_value(query).unwrap(),
        });
        Ok(self.lookups.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn create_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> Result<WriteEnvelope, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Create {
            collection: collection.to_owned(),
            records,
        });
        Ok(self.writes.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn update_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> Result<WriteEnvelope, GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::Update {
            collection: collection.to_owned(),
            records,
        });
        Ok(self.writes.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Identity double with a fixed resolution result.
pub struct FakeIdentity {
    identity: Option<Identity>,
}

impl FakeIdentity {
    pub fn signed_in(email: &str) -> Arc<Self> {
        Arc::new(Self {
            identity: Some(Identity {
                email_address: email.to_owned(),
            }),
        })
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self { identity: None })
    }
}

impl IdentityResolver for FakeIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

// =============================================================================
// Envelope and record builders
// =============================================================================

pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => RawRecord::from(map),
        _ => RawRecord::new(),
    }
}

pub fn ok_fetch(records: Vec<Value>) -> FetchEnvelope {
    FetchEnvelope {
        success: true,
        data: Some(records.into_iter().map(record).collect()),
        message: None,
    }
}

pub fn failed_fetch(message: &str) -> FetchEnvelope {
    FetchEnvelope {
        success: false,
        data: None,
        message: Some(message.to_owned()),
    }
}

pub fn ok_lookup(value: Value) -> RecordEnvelope {
    RecordEnvelope {
        success: true,
        data: Some(record(value)),
        message: None,
    }
}

pub fn failed_lookup(message: &str) -> RecordEnvelope {
    RecordEnvelope {
        success: false,
        data: None,
        message: Some(message.to_owned()),
    }
}

pub fn ok_write(results: Vec<RecordResult>) -> WriteEnvelope {
    WriteEnvelope {
        success: true,
        results: Some(results),
        message: None,
    }
}

pub fn ok_result(value: Value) -> RecordResult {
    RecordResult {
        success: true,
        data: Some(record(value)),
        message: None,
    }
}

pub fn failed_result(message: &str) -> RecordResult {
    RecordResult {
        success: false,
        data: None,
        message: Some(message.to_owned()),
    }
}

/// A minimal `user_c` record for profile resolution.
pub fn user_record(id: i64, email: &str) -> Value {
    json!({
        "Id": id,
        "email_c": email,
        "first_name_c": "Ines",
        "last_name_c": "Moreau",
        "phone_c": "",
        "created_at_c": "2026-01-15T09:00:00.000Z",
    })
}

/// Queue the two fetches `get_profile` performs: the user match and the
/// address join.
pub fn queue_profile(gateway: &FakeGateway, user_id: i64, email: &str) {
    gateway.queue_fetch(ok_fetch(vec![user_record(user_id, email)]));
    gateway.queue_fetch(ok_fetch(vec![]));
}
