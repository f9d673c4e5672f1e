//! HTTP implementation of the record gateway.
//!
//! Speaks the store's JSON envelope protocol over `reqwest`. Every call is
//! a single POST; the response body is read as text first so parse failures
//! can be logged with a snippet of what actually came back.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::StoreConfig;
use crate::query::Query;

use super::{
    FetchEnvelope, GatewayError, RawRecord, RecordEnvelope, RecordGateway, WriteEnvelope,
};

const BODY_SNIPPET_LEN: usize = 500;

#[derive(Serialize)]
struct WritePayload {
    records: Vec<RawRecord>,
}

/// Record gateway over the store's HTTP API.
#[derive(Clone)]
pub struct HttpRecordGateway {
    inner: Arc<HttpRecordGatewayInner>,
}

struct HttpRecordGatewayInner {
    client: reqwest::Client,
    endpoint: String,
    api_version: String,
    api_key: String,
}

impl HttpRecordGateway {
    /// Create a new gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: &StoreConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(HttpRecordGatewayInner {
                client,
                endpoint: config.endpoint.as_str().trim_end_matches('/').to_string(),
                api_version: config.api_version.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        })
    }

    fn url(&self, collection: &str, tail: &str) -> String {
        format!(
            "{}/api/{}/{collection}/{tail}",
            self.inner.endpoint, self.inner.api_version
        )
    }

    /// Execute a POST and decode the envelope.
    async fn post<B, T>(&self, url: String, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(&url)
            .header("X-Api-Key", &self.inner.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(GatewayError::RateLimited(retry_after));
        }

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&response_text),
                "record store returned non-success status"
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: snippet(&response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&response_text),
                "failed to parse record store envelope"
            );
            GatewayError::Parse(e)
        })
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

impl RecordGateway for HttpRecordGateway {
    #[instrument(skip(self, query), fields(collection = %collection))]
    async fn fetch_records(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<FetchEnvelope, GatewayError> {
        self.post(self.url(collection, "query"), query).await
    }

    #[instrument(skip(self, query), fields(collection = %collection, id = %id))]
    async fn get_record_by_id(
        &self,
        collection: &str,
        id: i64,
        query: &Query,
    ) -> Result<RecordEnvelope, GatewayError> {
        self.post(self.url(collection, &format!("records/{id}")), query)
            .await
    }

    #[instrument(skip(self, records), fields(collection = %collection, count = records.len()))]
    async fn create_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> Result<WriteEnvelope, GatewayError> {
        self.post(self.url(collection, "create"), &WritePayload { records })
            .await
    }

    #[instrument(skip(self, records), fields(collection = %collection, count = records.len()))]
    async fn update_records(
        &self,
        collection: &str,
        records: Vec<RawRecord>,
    ) -> Result<WriteEnvelope, GatewayError> {
        self.post(self.url(collection, "update"), &WritePayload { records })
            .await
    }
}
