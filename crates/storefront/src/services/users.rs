//! Profile and address reads/writes.

use std::sync::Arc;

use tracing::instrument;

use velvet_outlet_core::{Email, UserId};

use crate::conversions::{
    address_from_record, coerce, profile_from_record, profile_update_record,
};
use crate::error::StoreError;
use crate::gateway::RecordGateway;
use crate::identity::IdentityResolver;
use crate::query::{Query, equals};
use crate::schema::{self, address, user};
use crate::types::{Address, ProfileUpdate, UserProfile};

use super::{check_write, records_or_empty};

/// The caller's own profile and addresses.
///
/// The profile is resolved by matching the external identity's email
/// against the store; the caller never supplies a user id. Addresses are
/// joined in with a second query keyed by the resolved id.
pub struct UserService<G, I> {
    gateway: Arc<G>,
    identity: Arc<I>,
}

impl<G, I> Clone for UserService<G, I> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<G: RecordGateway, I: IdentityResolver> UserService<G, I> {
    /// Create a user service.
    #[must_use]
    pub fn new(gateway: Arc<G>, identity: Arc<I>) -> Self {
        Self { gateway, identity }
    }

    /// The current identity's email, or `Unauthenticated`.
    fn resolve_email(&self) -> Result<Email, StoreError> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(StoreError::Unauthenticated)?;
        Email::parse(&identity.email_address).map_err(|e| {
            tracing::debug!(error = %e, "identity carries an unusable email");
            StoreError::Unauthenticated
        })
    }

    /// The caller's profile, with addresses joined in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unauthenticated`] without an external identity
    /// and [`StoreError::ProfileNotFound`] when the email match yields no
    /// record.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<UserProfile, StoreError> {
        let email = self.resolve_email()?;

        let query = Query::select(user::PROJECTION)
            .filter(equals(user::EMAIL, email.as_str()));
        let envelope = self.gateway.fetch_records(user::COLLECTION, &query).await?;
        if !envelope.success {
            return Err(StoreError::ProfileNotFound);
        }
        let record = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(StoreError::ProfileNotFound)?;

        let user_id =
            UserId::new(coerce::record_ref(record.get(schema::ID)).unwrap_or_default());
        let addresses = self.addresses_for(user_id).await?;

        Ok(profile_from_record(&record, addresses))
    }

    /// The caller's saved addresses - the same join
    /// [`get_profile`](Self::get_profile) performs, exposed on its own.
    ///
    /// # Errors
    ///
    /// Propagates the profile resolution errors of
    /// [`get_profile`](Self::get_profile).
    #[instrument(skip(self))]
    pub async fn get_addresses(&self) -> Result<Vec<Address>, StoreError> {
        let profile = self.get_profile().await?;
        Ok(profile.addresses)
    }

    /// Update the caller's name and phone.
    ///
    /// The profile is re-resolved first so the update can only ever target
    /// the caller's own record, and the canonical profile is re-fetched
    /// afterwards - the store's update result is not assumed to carry the
    /// full entity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] with the store's message when the
    /// write is rejected, plus the resolution errors of
    /// [`get_profile`](Self::get_profile).
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, StoreError> {
        let current = self.get_profile().await?;

        let record = profile_update_record(current.id, update);
        let envelope = self
            .gateway
            .update_records(user::COLLECTION, vec![record])
            .await?;
        check_write(&envelope, "Failed to update profile")?;

        self.get_profile().await
    }

    /// Fetch the addresses owned by `user_id`, empty on store-reported
    /// failure.
    async fn addresses_for(&self, user_id: UserId) -> Result<Vec<Address>, StoreError> {
        let query = Query::select(address::PROJECTION)
            .filter(equals(address::USER_ID, user_id.as_i64()));
        let envelope = self
            .gateway
            .fetch_records(address::COLLECTION, &query)
            .await?;
        Ok(records_or_empty(envelope, address::COLLECTION)
            .iter()
            .map(address_from_record)
            .collect())
    }
}
