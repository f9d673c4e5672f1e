//! Velvet Outlet Core - Shared types library.
//!
//! This crate provides common types used across all Velvet Outlet components:
//! - `storefront` - Record-store data-access layer for the public site
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no record
//! store access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
