//! End-to-end TikTok Shop adapter flows against a mock platform.

use orderhub_core::{Credential, FulfillmentAction, OrderQuery, Platform, UnifiedOrderStatus};
use orderhub_platforms::services::{
    AuthorizationService, FulfillmentService, LogisticsService, OrderService,
};
use orderhub_platforms::{IntegrationError, TikTokAdapter, TikTokConfig};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer) -> TikTokAdapter {
    let mut config = TikTokConfig::new("test-key", "test-secret");
    config.api_base_url = server.uri();
    config.auth_api_base_url = server.uri();
    TikTokAdapter::new(config).expect("adapter builds")
}

fn credential() -> Credential {
    Credential {
        shop_cipher: Some("ROW_cipher".to_string()),
        ..Credential::new(Platform::TikTokShop, "access-token")
    }
}

fn order_payload(status: &str, with_package: bool) -> serde_json::Value {
    let packages = if with_package {
        json!([{"id": "pkg-1", "status": "PROCESSING"}])
    } else {
        json!([])
    };
    json!({
        "id": "576461413038785752",
        "status": status,
        "create_time": 1_700_000_000,
        "update_time": 1_700_000_600,
        "recipient_address": {
            "name": "Jane Buyer",
            "phone": "+52 55 0000 0000",
            "full_address": "123 Calle Falsa, CDMX",
            "postal_code": "06600"
        },
        "payment": {"currency": "MXN", "total_amount": "21.50"},
        "line_items": [{
            "id": "li-1",
            "product_id": "p-1",
            "product_name": "Widget",
            "sku_id": "sku-1",
            "sku_name": "Blue",
            "seller_sku": "W-BLU",
            "sale_price": "10.75",
            "quantity": 2
        }],
        "packages": packages
    })
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({"code": 0, "message": "Success", "request_id": "req-1", "data": data})
}

#[tokio::test]
async fn exchange_code_maps_token_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/token/get"))
        .and(query_param("app_key", "test-key"))
        .and(query_param("auth_code", "auth-123"))
        .and(query_param("grant_type", "authorized_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "access_token": "at-1",
            "access_token_expire_in": 1_896_000_000,
            "refresh_token": "rt-1",
            "refresh_token_expire_in": 1_900_000_000,
            "open_id": "seller-9"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let credential = adapter(&server)
        .exchange_code("auth-123")
        .await
        .expect("exchange succeeds");

    assert_eq!(credential.platform, Platform::TikTokShop);
    assert_eq!(credential.access_token_str(), "at-1");
    assert_eq!(credential.refresh_token_str(), Some("rt-1"));
    assert_eq!(credential.seller_id.as_deref(), Some("seller-9"));
    assert_eq!(
        credential.access_token_expires_at.map(|t| t.timestamp()),
        Some(1_896_000_000)
    );
}

#[tokio::test]
async fn exchange_code_rejection_is_auth_exchange_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/token/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 36004004, "message": "auth_code expired", "request_id": "req-2"
        })))
        .mount(&server)
        .await;

    let err = adapter(&server).exchange_code("stale").await.unwrap_err();
    assert!(matches!(err, IntegrationError::AuthExchange(_)));
}

#[tokio::test]
async fn refresh_without_token_is_refresh_unavailable() {
    let server = MockServer::start().await;
    let err = adapter(&server)
        .refresh(&credential())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::RefreshUnavailable));
}

#[tokio::test]
async fn orders_are_signed_and_mapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/order/202309/orders/search"))
        .and(query_param("app_key", "test-key"))
        .and(query_param("shop_cipher", "ROW_cipher"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", false)],
            "next_page_token": "opaque-token-xyz"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let query = OrderQuery {
        page_size: 20,
        ..OrderQuery::default()
    };
    let page = adapter(&server)
        .orders(&credential(), &query)
        .await
        .expect("listing succeeds");

    assert_eq!(page.items.len(), 1);
    let order = &page.items[0];
    assert_eq!(order.order_id, "576461413038785752");
    assert_eq!(order.unified_status, UnifiedOrderStatus::ReadyForFulfillment);
    assert_eq!(order.buyer.as_deref(), Some("Jane Buyer"));
    // Opaque server token round-trips verbatim
    assert_eq!(page.next_page_token.as_deref(), Some("opaque-token-xyz"));

    // Every signed request carries the computed signature and a timestamp
    let requests = server.received_requests().await.expect("recording on");
    let url = requests[0].url.to_string();
    assert!(url.contains("sign="));
    assert!(url.contains("timestamp="));
}

#[tokio::test]
async fn missing_shop_cipher_fails_before_any_request() {
    let server = MockServer::start().await;
    let bare = Credential::new(Platform::TikTokShop, "access-token");

    let err = adapter(&server)
        .orders(&bare, &OrderQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::MissingShopCipher));

    let requests = server.received_requests().await.expect("recording on");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn label_present_downloads_without_ship_trigger() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order/202309/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", true)]
        }))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fulfillment/202309/packages/pkg-1/shipping_documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "doc_url": format!("{}/label.pdf", server.uri()),
            "tracking_number": "JX7788"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/label.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 label".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fulfillment/202309/packages/pkg-1/ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(0)
        .mount(&server)
        .await;

    let action = adapter(&server)
        .prepare_fulfillment(&credential(), "576461413038785752", true)
        .await
        .expect("fulfillment prepared");

    match action {
        FulfillmentAction::DownloadLabel {
            label,
            mime_type,
            tracking_number,
            receiver_name,
        } => {
            assert_eq!(label, b"%PDF-1.7 label");
            assert_eq!(mime_type, "application/pdf");
            assert_eq!(tracking_number, "JX7788");
            assert_eq!(receiver_name, "Jane Buyer");
        }
        other => panic!("expected DownloadLabel, got {other:?}"),
    }
}

#[tokio::test]
async fn label_absent_without_auto_ship_is_error_action() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order/202309/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", true)]
        }))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fulfillment/202309/packages/pkg-1/shipping_documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 21001, "message": "label not ready", "request_id": "req-3"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fulfillment/202309/packages/pkg-1/ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(0)
        .mount(&server)
        .await;

    let action = adapter(&server)
        .prepare_fulfillment(&credential(), "576461413038785752", false)
        .await
        .expect("terminal action returned");
    assert!(action.is_error());
}

#[tokio::test]
async fn auto_ship_triggers_once_and_rechecks_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order/202309/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", true)]
        }))))
        .mount(&server)
        .await;

    // First document check: no label yet. Expires after one match so the
    // re-check lands on the next mock.
    Mock::given(method("GET"))
        .and(path("/fulfillment/202309/packages/pkg-1/shipping_documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 21001, "message": "label not ready", "request_id": "req-4"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fulfillment/202309/packages/pkg-1/ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;
    // Second document check after the trigger: label ready.
    Mock::given(method("GET"))
        .and(path("/fulfillment/202309/packages/pkg-1/shipping_documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "doc_url": format!("{}/label.pdf", server.uri()),
            "tracking_number": "JX9900"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/label.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7 retry".to_vec()))
        .mount(&server)
        .await;

    let action = adapter(&server)
        .prepare_fulfillment(&credential(), "576461413038785752", true)
        .await
        .expect("fulfillment prepared");

    assert!(matches!(
        action,
        FulfillmentAction::DownloadLabel { tracking_number, .. } if tracking_number == "JX9900"
    ));
}

#[tokio::test]
async fn order_without_packages_has_no_shippable_unit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order/202309/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", false)]
        }))))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .prepare_fulfillment(&credential(), "576461413038785752", true)
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::NoShipment(_)));
}

#[tokio::test]
async fn submit_tracking_ships_first_package() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/order/202309/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "orders": [order_payload("AWAITING_SHIPMENT", true)]
        }))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fulfillment/202309/packages/pkg-1/ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let tracking = orderhub_core::TrackingInfo {
        tracking_number: "MEX-001".to_string(),
        shipping_provider_id: Some("prov-7".to_string()),
        order_line_item_ids: Vec::new(),
    };
    adapter(&server)
        .submit_tracking(&credential(), "576461413038785752", &tracking)
        .await
        .expect("tracking submitted");
}

#[tokio::test]
async fn tracking_events_map_epoch_millis() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fulfillment/202309/orders/576461413038785752/tracking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "tracking": [
                {
                    "description": "Package picked up",
                    "location": "CDMX hub",
                    "update_time_millis": 1_700_000_000_000_i64
                },
                {
                    "description": "Out for delivery",
                    "update_time_millis": 1_700_086_400_000_i64
                }
            ]
        }))))
        .mount(&server)
        .await;

    let shipment = adapter(&server)
        .tracking_events(&credential(), "576461413038785752")
        .await
        .expect("tracking fetched");

    assert_eq!(shipment.tracking_events.len(), 2);
    assert_eq!(shipment.tracking_events[0].description, "Package picked up");
    assert_eq!(
        shipment.tracking_events[0].location.as_deref(),
        Some("CDMX hub")
    );
    assert_eq!(
        shipment.tracking_events[0].time.timestamp_millis(),
        1_700_000_000_000
    );
}
