//! TikTok Shop order retrieval and mapping.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use orderhub_core::{
    Credential, OrderQuery, Page, UnifiedAddress, UnifiedOrder, UnifiedOrderItem, UnifiedShipment,
};
use rust_decimal::Decimal;
use tracing::{instrument, warn};

use super::TikTokAdapter;
use super::status::to_unified_status;
use super::types::{TikTokApiResponse, TikTokOrder, TikTokOrderListData};
use crate::error::IntegrationError;
use crate::services::OrderService;

#[async_trait]
impl OrderService for TikTokAdapter {
    #[instrument(skip(self, credential), fields(page_size = query.page_size))]
    async fn orders(
        &self,
        credential: &Credential,
        query: &OrderQuery,
    ) -> Result<Page<UnifiedOrder>, IntegrationError> {
        let mut params = vec![
            ("page_size", query.page_size.to_string()),
            ("sort_field", "create_time".to_string()),
            ("sort_order", "ASC".to_string()),
        ];
        if let Some(token) = query.page_token.as_deref().filter(|t| !t.is_empty()) {
            params.push(("page_token", token.to_string()));
        }

        // Time-window and status filters travel in the body; the body string
        // participates in the signature, so it is serialized exactly once.
        let mut body = serde_json::Map::new();
        if let Some(from) = query.created_from {
            body.insert("create_time_ge".to_string(), from.timestamp().into());
        }
        if let Some(to) = query.created_to {
            body.insert("create_time_lt".to_string(), to.timestamp().into());
        }
        if let Some(status) = query.order_status.as_deref().filter(|s| !s.is_empty()) {
            body.insert("order_status".to_string(), status.into());
        }
        let body = serde_json::Value::Object(body).to_string();

        let request =
            self.signed_post("/order/202309/orders/search", credential, &params, body, true)?;
        let response: TikTokApiResponse<TikTokOrderListData> =
            self.http.execute_json(request).await?;
        let Some(data) = response.into_data()? else {
            return Ok(Page::empty());
        };

        Ok(Page {
            items: data.orders.iter().map(map_order).collect(),
            next_page_token: data.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    #[instrument(skip(self, credential), fields(count = order_ids.len()))]
    async fn order_details(
        &self,
        credential: &Credential,
        order_ids: &[String],
    ) -> Result<Vec<UnifiedOrder>, IntegrationError> {
        let orders = self.raw_order_details(credential, order_ids).await?;
        Ok(orders.iter().map(map_order).collect())
    }
}

impl TikTokAdapter {
    /// Fetch order details in their wire shape. Fulfillment needs the raw
    /// package list, so this stays separate from the unified mapping.
    pub(super) async fn raw_order_details(
        &self,
        credential: &Credential,
        order_ids: &[String],
    ) -> Result<Vec<TikTokOrder>, IntegrationError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = [("ids", order_ids.join(","))];
        let request = self.signed_get("/order/202309/orders", credential, &params, true)?;
        let response: TikTokApiResponse<TikTokOrderListData> =
            self.http.execute_json(request).await?;
        Ok(response.into_data()?.map_or_else(Vec::new, |d| d.orders))
    }
}

/// Map one TikTok order into the unified shape. Pure: mapping the same
/// payload twice yields field-for-field identical results.
pub(super) fn map_order(order: &TikTokOrder) -> UnifiedOrder {
    let mut unified = UnifiedOrder {
        order_id: order.id.clone(),
        original_status: order.status.clone(),
        unified_status: order
            .status
            .as_deref()
            .map(to_unified_status)
            .unwrap_or_default(),
        created_at: order.create_time.and_then(epoch_seconds),
        updated_at: order.update_time.and_then(epoch_seconds),
        ..UnifiedOrder::default()
    };

    if let Some(payment) = &order.payment {
        unified.currency = payment.currency.clone();
        unified.total_amount = payment.total_amount.as_deref().and_then(parse_amount);
    }

    // Buyer identity comes from the recipient address; TikTok does not
    // expose a buyer profile on the order.
    if let Some(address) = &order.recipient_address {
        unified.buyer = address.name.clone();
    }

    unified.items = order
        .line_items
        .iter()
        .map(|line| UnifiedOrderItem {
            line_id: Some(line.id.clone()),
            product_id: line.product_id.clone(),
            product_name: line.product_name.clone(),
            sku_id: line.sku_id.clone(),
            // Seller SKU and platform SKU combined so either side of the
            // warehouse can match on its own identifier.
            sku_name: Some(format!(
                "{}/{}",
                non_empty(line.seller_sku.as_deref()).unwrap_or("-"),
                non_empty(line.sku_name.as_deref()).unwrap_or("-"),
            )),
            image_url: line.sku_image.clone(),
            quantity: line.quantity.unwrap_or(1),
            unit_price: line.sale_price.as_deref().and_then(parse_amount),
        })
        .collect();

    let mut shipment = UnifiedShipment {
        tracking_number: order.tracking_number.clone(),
        carrier: order.shipping_provider.clone(),
        ..UnifiedShipment::default()
    };
    if let Some(address) = &order.recipient_address {
        shipment.shipping_address = Some(UnifiedAddress {
            full_name: address.name.clone(),
            phone: address.phone.clone(),
            street: address.full_address.clone(),
            zip_code: address.postal_code.clone(),
            country_code: address.region_code.clone(),
            ..UnifiedAddress::default()
        });
    }
    unified.shipment = shipment;

    if let Ok(raw) = serde_json::to_value(order) {
        unified.raw.insert("original_order".to_string(), raw);
    }

    unified
}

fn epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

fn parse_amount(value: &str) -> Option<Decimal> {
    match Decimal::from_str(value) {
        Ok(amount) => Some(amount),
        Err(_) => {
            warn!(value, "unparseable amount in TikTok payload");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
