//! Order reads and creation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use velvet_outlet_core::OrderId;

use crate::conversions::{order_from_record, order_record, synthesized_order};
use crate::error::StoreError;
use crate::gateway::RecordGateway;
use crate::identity::IdentityResolver;
use crate::query::{Query, SortDirection, equals};
use crate::schema::order;
use crate::types::{Order, OrderDraft};

use super::{UserService, check_write, records_or_empty};

/// The caller's orders.
///
/// Every operation resolves the caller's profile first: creation stamps the
/// resolved id as the owner, reads filter or re-validate against it. A
/// fetched order owned by someone else is reported as not found - absence
/// and foreign ownership are deliberately indistinguishable.
pub struct OrderService<G, I> {
    gateway: Arc<G>,
    users: UserService<G, I>,
}

impl<G, I> Clone for OrderService<G, I> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            users: self.users.clone(),
        }
    }
}

impl<G: RecordGateway, I: IdentityResolver> OrderService<G, I> {
    /// Create an order service sharing the user service's profile
    /// resolution.
    #[must_use]
    pub fn new(gateway: Arc<G>, users: UserService<G, I>) -> Self {
        Self { gateway, users }
    }

    /// Place a new order for the caller.
    ///
    /// Synthesizes the order number and creation timestamp, JSON-encodes
    /// the embedded sub-fields, and validates the store's per-record
    /// results: any failed record aborts with that record's message. When
    /// the result shape omits the stored record, the returned entity is
    /// rebuilt from the submitted input instead of losing the order
    /// silently.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthenticated`]/[`StoreError::ProfileNotFound`]
    /// when no profile resolves, and [`StoreError::Validation`] when the
    /// store rejects the write.
    #[instrument(skip(self, draft))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let profile = self.users.get_profile().await?;

        let created_at = Utc::now();
        let number = order_number(created_at);
        let record = order_record(profile.id, &number, &draft, created_at);

        let envelope = self
            .gateway
            .create_records(order::COLLECTION, vec![record])
            .await?;
        check_write(&envelope, "Failed to create order")?;

        if let Some(stored) = envelope
            .results
            .into_iter()
            .flatten()
            .find(|r| r.success)
            .and_then(|r| r.data)
        {
            return Ok(order_from_record(&stored));
        }

        tracing::debug!(order_number = %number, "create result omitted record data, rebuilding from input");
        Ok(synthesized_order(profile.id, number, draft, created_at))
    }

    /// The caller's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns the profile resolution errors of
    /// [`UserService::get_profile`]; a store-reported failure on the list
    /// read degrades to an empty list.
    #[instrument(skip(self))]
    pub async fn get_user_orders(&self) -> Result<Vec<Order>, StoreError> {
        let profile = self.users.get_profile().await?;

        let query = Query::select(order::PROJECTION)
            .filter(equals(order::USER_ID, profile.id.as_i64()))
            .order_by(order::CREATED_AT, SortDirection::Descending);
        let envelope = self
            .gateway
            .fetch_records(order::COLLECTION, &query)
            .await?;
        Ok(records_or_empty(envelope, order::COLLECTION)
            .iter()
            .map(order_from_record)
            .collect())
    }

    /// One of the caller's orders by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the store reports failure,
    /// returns no data, or the order belongs to a different user.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order_by_id(&self, id: OrderId) -> Result<Order, StoreError> {
        let profile = self.users.get_profile().await?;

        let envelope = self
            .gateway
            .get_record_by_id(order::COLLECTION, id.as_i64(), &Query::select(order::PROJECTION))
            .await?;
        if !envelope.success {
            return Err(StoreError::NotFound("order"));
        }
        let record = envelope.data.ok_or(StoreError::NotFound("order"))?;

        let fetched = order_from_record(&record);
        if fetched.user_id != profile.id {
            tracing::debug!(order = %fetched.id, "ownership mismatch, reporting not found");
            return Err(StoreError::NotFound("order"));
        }
        Ok(fetched)
    }
}

/// Store-assigned order number pattern: `VO` plus the last 8 digits of the
/// creation time in epoch milliseconds.
fn order_number(created_at: DateTime<Utc>) -> String {
    format!("VO{:08}", created_at.timestamp_millis().rem_euclid(100_000_000))
}
