//! Order conversion.
//!
//! Orders carry two JSON-encoded sub-fields (`items_c`,
//! `shipping_address_c`): the read path decodes them with the usual
//! degrade-to-default rules, the write path re-encodes them. The owning
//! user may arrive as a nested record or a bare id depending on how the
//! store expanded the relation.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use velvet_outlet_core::{OrderId, OrderStatus, UserId};

use crate::gateway::RawRecord;
use crate::schema::{self, order};
use crate::types::{Order, OrderDraft};

use super::coerce;

/// Convert a raw `order_c` record into an [`Order`].
#[must_use]
pub fn order_from_record(record: &RawRecord) -> Order {
    Order {
        id: OrderId::new(coerce::record_ref(record.get(schema::ID)).unwrap_or_default()),
        user_id: UserId::new(coerce::record_ref(record.get(order::USER_ID)).unwrap_or_default()),
        order_number: coerce::string_or_empty(record.get(order::ORDER_NUMBER)),
        items: coerce::json_list_or_empty(record.get(order::ITEMS)),
        subtotal: coerce::decimal_or_zero(record.get(order::SUBTOTAL)),
        shipping: coerce::decimal_or_zero(record.get(order::SHIPPING)),
        tax: coerce::decimal_or_zero(record.get(order::TAX)),
        total: coerce::decimal_or_zero(record.get(order::TOTAL)),
        shipping_address: coerce::json_struct_or_default(record.get(order::SHIPPING_ADDRESS)),
        status: OrderStatus::from(coerce::string_or_empty(record.get(order::STATUS))),
        created_at: coerce::timestamp(record.get(order::CREATED_AT)),
    }
}

/// Build the raw create payload for a new order.
///
/// `order_number` and `created_at` are synthesized by the service at
/// construction time; every new order starts in `Processing`.
#[must_use]
pub fn order_record(
    user_id: UserId,
    order_number: &str,
    draft: &OrderDraft,
    created_at: DateTime<Utc>,
) -> RawRecord {
    let mut record = RawRecord::new();
    record.set(order::USER_ID, user_id.as_i64());
    record.set(order::ORDER_NUMBER, order_number);
    record.set(order::ITEMS, encode_json(&draft.items, "[]"));
    record.set(order::SUBTOTAL, decimal_number(draft.subtotal));
    record.set(order::SHIPPING, decimal_number(draft.shipping));
    record.set(order::TAX, decimal_number(draft.tax));
    record.set(order::TOTAL, decimal_number(draft.total));
    record.set(
        order::SHIPPING_ADDRESS,
        encode_json(&draft.shipping_address, "{}"),
    );
    record.set(order::STATUS, OrderStatus::Processing.as_str());
    record.set(
        order::CREATED_AT,
        created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    record
}

/// Rebuild an [`Order`] from the submitted draft when the store's create
/// result omitted per-record data.
#[must_use]
pub fn synthesized_order(
    user_id: UserId,
    order_number: String,
    draft: OrderDraft,
    created_at: DateTime<Utc>,
) -> Order {
    Order {
        id: OrderId::new(created_at.timestamp_millis()),
        user_id,
        order_number,
        items: draft.items,
        subtotal: draft.subtotal,
        shipping: draft.shipping,
        tax: draft.tax,
        total: draft.total,
        shipping_address: draft.shipping_address,
        status: OrderStatus::Processing,
        created_at: Some(created_at),
    }
}

fn encode_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_owned())
}

fn decimal_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
