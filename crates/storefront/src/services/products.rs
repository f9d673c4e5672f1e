//! Catalog reads.

use std::sync::Arc;

use tracing::instrument;

use velvet_outlet_core::ProductId;

use crate::config::EmptySearchPolicy;
use crate::conversions::product_from_record;
use crate::error::StoreError;
use crate::gateway::RecordGateway;
use crate::query::{Query, contains, equals};
use crate::schema::product;
use crate::types::Product;

use super::records_or_empty;

/// Read-only access to the product catalog.
///
/// All list operations return an empty list when the store reports failure;
/// only [`get_by_id`](Self::get_by_id) fails loudly, because ids are unique
/// and a silently-empty result would be indistinguishable from absence.
pub struct ProductService<G> {
    gateway: Arc<G>,
    empty_search: EmptySearchPolicy,
}

impl<G> Clone for ProductService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            empty_search: self.empty_search,
        }
    }
}

impl<G: RecordGateway> ProductService<G> {
    /// Create a product service with the default empty-search policy.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            empty_search: EmptySearchPolicy::default(),
        }
    }

    /// Override the policy applied to empty search text.
    #[must_use]
    pub const fn with_empty_search_policy(mut self, policy: EmptySearchPolicy) -> Self {
        self.empty_search = policy;
        self
    }

    fn projection() -> Query {
        Query::select(product::PROJECTION)
    }

    async fn fetch_list(&self, query: Query) -> Result<Vec<Product>, StoreError> {
        let envelope = self
            .gateway
            .fetch_records(product::COLLECTION, &query)
            .await?;
        Ok(records_or_empty(envelope, product::COLLECTION)
            .iter()
            .map(product_from_record)
            .collect())
    }

    /// The full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure; a store-reported failure
    /// degrades to an empty list.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        self.fetch_list(Self::projection()).await
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the store reports failure or
    /// returns no data.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let envelope = self
            .gateway
            .get_record_by_id(product::COLLECTION, id.as_i64(), &Self::projection())
            .await?;
        if !envelope.success {
            return Err(StoreError::NotFound("product"));
        }
        let record = envelope.data.ok_or(StoreError::NotFound("product"))?;
        Ok(product_from_record(&record))
    }

    /// Products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        self.fetch_list(Self::projection().filter(equals(product::CATEGORY, category)))
            .await
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get_featured(&self) -> Result<Vec<Product>, StoreError> {
        self.fetch_list(Self::projection().filter(equals(product::FEATURED, true)))
            .await
    }

    /// Products flagged as trending.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get_trending(&self) -> Result<Vec<Product>, StoreError> {
        self.fetch_list(Self::projection().filter(equals(product::TRENDING, true)))
            .await
    }

    /// Free-text search across name, category, and description.
    ///
    /// Empty text is handled per the configured [`EmptySearchPolicy`]; no
    /// subcondition match yields an empty result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<Product>, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            match self.empty_search {
                EmptySearchPolicy::MatchAll => return self.get_all().await,
                EmptySearchPolicy::MatchNone => return Ok(Vec::new()),
                EmptySearchPolicy::Forward => {}
            }
        }
        self.fetch_list(Self::projection().any_of([
            contains(product::NAME, trimmed),
            contains(product::CATEGORY, trimmed),
            contains(product::DESCRIPTION, trimmed),
        ]))
        .await
    }
}
