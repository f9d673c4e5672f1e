//! Domain types for the storefront.
//!
//! These types provide a clean, typed API separate from the raw record
//! shapes the store returns. Entities are rebuilt fresh on every read; there
//! is no identity map.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use velvet_outlet_core::{AddressId, OrderId, OrderStatus, ProductId, UserId};

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: Decimal,
    /// Image URLs in display order.
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub description: String,
    pub in_stock: bool,
    pub stock_count: u32,
    pub featured: bool,
    pub trending: bool,
}

// =============================================================================
// User & Address
// =============================================================================

/// The caller's own profile, with their addresses joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Empty string when the user has not provided one.
    pub phone: String,
    pub created_at: Option<DateTime<Utc>>,
    pub addresses: Vec<Address>,
}

/// A saved address, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

/// Partial profile update: only name and phone may change here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// A line item as embedded in the order record's JSON `items_c` text.
///
/// The checkout front end owns this shape (camelCase keys); unknown keys
/// pass through `extra` so a read-modify-write cycle reproduces them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The shipping address snapshot embedded in the order record.
///
/// A value-type copy taken at checkout, deliberately not a reference to the
/// user's saved [`Address`] rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for creating an order.
///
/// The service synthesizes the rest: owner, order number, status, creation
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
}
