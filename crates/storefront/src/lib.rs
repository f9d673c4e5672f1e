//! Velvet Outlet Storefront data-access layer.
//!
//! This crate translates a generic, schema-agnostic record store into typed
//! domain entities and mediates all reads and writes of storefront state.
//!
//! # Architecture
//!
//! - [`query`] builds declarative read queries and serializes them to the
//!   store's wire format
//! - [`gateway`] defines the record-store contract ([`gateway::RecordGateway`])
//!   and an HTTP implementation over `reqwest`
//! - [`conversions`] maps raw records to domain entities and back, degrading
//!   malformed embedded data to typed defaults instead of failing
//! - [`services`] orchestrates queries, gateway calls, and conversions per
//!   entity, and enforces identity and ownership checks
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use velvet_outlet_storefront::config::StoreConfig;
//! use velvet_outlet_storefront::gateway::HttpRecordGateway;
//! use velvet_outlet_storefront::services::ProductService;
//!
//! let config = StoreConfig::from_env()?;
//! let gateway = Arc::new(HttpRecordGateway::new(&config)?);
//!
//! let products = ProductService::new(gateway);
//! let featured = products.get_featured().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod conversions;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod query;
pub mod schema;
pub mod services;
pub mod types;

pub use error::StoreError;
