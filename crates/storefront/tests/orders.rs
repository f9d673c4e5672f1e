//! OrderService behavior against a scripted gateway.

mod common;

use serde_json::json;

use velvet_outlet_core::{OrderId, OrderStatus, UserId};
use velvet_outlet_storefront::StoreError;
use velvet_outlet_storefront::gateway::{RecordResult, WriteEnvelope};
use velvet_outlet_storefront::services::{OrderService, UserService};
use velvet_outlet_storefront::types::{OrderDraft, OrderItem, ShippingAddress};

use common::{
    FakeGateway, FakeIdentity, GatewayCall, failed_fetch, failed_result, ok_lookup, ok_result,
    ok_write, queue_profile,
};

fn sample_draft() -> OrderDraft {
    OrderDraft {
        items: vec![OrderItem {
            product_id: Some(7),
            name: "Shirt".to_owned(),
            price: 19.99,
            quantity: 2,
            size: Some("M".to_owned()),
            color: None,
            image: None,
            extra: serde_json::Map::new(),
        }],
        subtotal: "39.98".parse().expect("decimal"),
        shipping: "5.00".parse().expect("decimal"),
        tax: "3.20".parse().expect("decimal"),
        total: "48.18".parse().expect("decimal"),
        shipping_address: ShippingAddress {
            first_name: "Ines".to_owned(),
            last_name: "Moreau".to_owned(),
            address: "12 Rue Cler".to_owned(),
            city: "Paris".to_owned(),
            state: String::new(),
            zip_code: "75007".to_owned(),
            country: "France".to_owned(),
            extra: serde_json::Map::new(),
        },
    }
}

fn order_record_value(id: i64, user_id: i64) -> serde_json::Value {
    json!({
        "Id": id,
        "user_id_c": {"Id": user_id, "Name": "Ines Moreau"},
        "order_number_c": "VO55443322",
        "items_c": "[{\"productId\":7,\"name\":\"Shirt\",\"price\":19.99,\"quantity\":2}]",
        "subtotal_c": "39.98",
        "shipping_c": "5.00",
        "tax_c": "3.20",
        "total_c": "48.18",
        "shipping_address_c": "{\"firstName\":\"Ines\",\"city\":\"Paris\"}",
        "status_c": "Processing",
        "created_at_c": "2026-08-01T10:00:00.000Z",
    })
}

fn service(gateway: std::sync::Arc<FakeGateway>) -> OrderService<FakeGateway, FakeIdentity> {
    let identity = FakeIdentity::signed_in("ines@example.com");
    let users = UserService::new(gateway.clone(), identity);
    OrderService::new(gateway, users)
}

#[tokio::test]
async fn create_order_requires_identity() {
    let gateway = FakeGateway::new();
    let users = UserService::new(gateway.clone(), FakeIdentity::signed_out());
    let orders = OrderService::new(gateway.clone(), users);

    let err = orders.create_order(sample_draft()).await.unwrap_err();
    assert!(matches!(err, StoreError::Unauthenticated));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn create_order_returns_the_stored_record() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_write(ok_write(vec![ok_result(order_record_value(12, 3))]));
    let orders = service(gateway.clone());

    let order = orders.create_order(sample_draft()).await.expect("create");
    assert_eq!(order.id, OrderId::new(12));
    assert_eq!(order.user_id, UserId::new(3));
    assert_eq!(order.status, OrderStatus::Processing);

    let calls = gateway.calls();
    let GatewayCall::Create { collection, records } = &calls[2] else {
        panic!("expected a create, got {calls:?}");
    };
    assert_eq!(collection, "order_c");
    assert_eq!(records.len(), 1);
    let payload = &records[0];
    assert_eq!(payload.get("user_id_c"), Some(&json!(3)));
    assert_eq!(payload.get("status_c"), Some(&json!("Processing")));
    let number = payload
        .get("order_number_c")
        .and_then(|v| v.as_str())
        .expect("order number");
    assert!(number.starts_with("VO"));
    assert_eq!(number.len(), 10);
    // Embedded sub-fields travel as JSON-encoded text
    assert!(payload.get("items_c").expect("items").is_string());
    assert!(payload.get("shipping_address_c").expect("address").is_string());
}

#[tokio::test]
async fn create_order_mixed_batch_fails_with_failed_message() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_write(ok_write(vec![
        ok_result(order_record_value(12, 3)),
        failed_result("total_c is required"),
    ]));
    let orders = service(gateway);

    let err = orders.create_order(sample_draft()).await.unwrap_err();
    // The successful sibling is not returned
    assert!(matches!(err, StoreError::Validation(msg) if msg == "total_c is required"));
}

#[tokio::test]
async fn create_order_synthesizes_entity_when_result_data_missing() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_write(WriteEnvelope {
        success: true,
        results: Some(vec![RecordResult {
            success: true,
            data: None,
            message: None,
        }]),
        message: None,
    });
    let orders = service(gateway);

    let draft = sample_draft();
    let order = orders.create_order(draft.clone()).await.expect("create");
    assert_eq!(order.user_id, UserId::new(3));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.items, draft.items);
    assert_eq!(order.total, draft.total);
    assert!(order.order_number.starts_with("VO"));
    assert!(order.created_at.is_some());
}

#[tokio::test]
async fn get_user_orders_degrades_store_failure_to_empty() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_fetch(failed_fetch("backend down"));
    let orders = service(gateway);

    let list = orders.get_user_orders().await.expect("degraded list read");
    assert!(list.is_empty());
}

#[tokio::test]
async fn get_user_orders_filters_by_owner_and_sorts_newest_first() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_fetch(common::ok_fetch(vec![order_record_value(12, 3)]));
    let orders = service(gateway.clone());

    let list = orders.get_user_orders().await.expect("list read");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].user_id, UserId::new(3));

    let calls = gateway.calls();
    let GatewayCall::Fetch { collection, query } = &calls[2] else {
        panic!("expected a fetch, got {calls:?}");
    };
    assert_eq!(collection, "order_c");
    assert_eq!(
        query["where"],
        json!([{"FieldName": "user_id_c", "Operator": "EqualTo", "Values": [3]}])
    );
    assert_eq!(
        query["orderBy"],
        json!([{"fieldName": "created_at_c", "sorttype": "DESC"}])
    );
}

#[tokio::test]
async fn get_order_by_id_returns_owned_order() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_lookup(ok_lookup(order_record_value(12, 3)));
    let orders = service(gateway);

    let order = orders.get_order_by_id(OrderId::new(12)).await.expect("lookup");
    assert_eq!(order.id, OrderId::new(12));
    assert_eq!(order.items.len(), 1);
}

#[tokio::test]
async fn get_order_by_id_collapses_foreign_ownership_into_not_found() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    // The record exists but belongs to user 4
    gateway.queue_lookup(ok_lookup(order_record_value(12, 4)));
    let orders = service(gateway);

    let err = orders.get_order_by_id(OrderId::new(12)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound("order")));
}

#[tokio::test]
async fn get_order_by_id_not_found_when_store_reports_failure() {
    let gateway = FakeGateway::new();
    queue_profile(&gateway, 3, "ines@example.com");
    gateway.queue_lookup(common::failed_lookup("no such record"));
    let orders = service(gateway);

    let err = orders.get_order_by_id(OrderId::new(99)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound("order")));
}
