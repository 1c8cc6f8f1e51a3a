//! Mercado Libre order retrieval, mapping, and image backfill.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderhub_core::{
    Credential, OrderQuery, Page, UnifiedAddress, UnifiedOrder, UnifiedOrderItem, UnifiedShipment,
};
use tracing::{debug, instrument, warn};

use super::MercadoLibreAdapter;
use super::packs::merge_pack;
use super::paging;
use super::status::to_unified_status;
use super::types::{
    MercadoLibreBuyer, MercadoLibreItemMultigetEntry, MercadoLibreOrder,
    MercadoLibreOrderSearchResponse, MercadoLibreReceiverAddress,
};
use crate::error::IntegrationError;
use crate::services::OrderService;

/// The item multiget endpoint accepts at most this many ids per call.
const ITEM_DETAIL_BATCH_SIZE: usize = 20;

#[async_trait]
impl OrderService for MercadoLibreAdapter {
    #[instrument(skip(self, credential), fields(page_size = query.page_size))]
    async fn orders(
        &self,
        credential: &Credential,
        query: &OrderQuery,
    ) -> Result<Page<UnifiedOrder>, IntegrationError> {
        let (limit, offset) = paging::resolve_page(query)?;

        let mut params = vec![
            ("seller", credential.seller_id.clone().unwrap_or_default()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("sort", "date_desc".to_string()),
        ];
        if let Some(from) = query.created_from {
            params.push(("order.date_created.from", hour_window(from)));
        }
        if let Some(to) = query.created_to {
            params.push(("order.date_created.to", hour_window(to)));
        }
        if let Some(status) = query.order_status.as_deref().filter(|s| !s.is_empty()) {
            params.push(("order.status", status.to_string()));
        }

        let request = self.bearer_get(credential, "/orders/search", &params)?;
        let response: MercadoLibreOrderSearchResponse = self.http.execute_json(request).await?;
        if response.results.is_empty() {
            return Ok(Page::empty());
        }

        let mut results = response.results;
        if query.filter_full_stock {
            // Orders stocked in the platform's own fulfillment center are
            // shipped by the platform; the WMS never sees them.
            results.retain(|order| {
                !order
                    .order_items
                    .first()
                    .is_some_and(|item| item.stock.is_some())
            });
        }

        let mut unified = Vec::with_capacity(results.len());
        let mut consolidated_packs: HashSet<i64> = HashSet::new();
        for raw in &results {
            let Some(pack_id) = raw.pack_id else {
                unified.push(self.map_order_with_status(credential, raw).await?);
                continue;
            };
            if consolidated_packs.contains(&pack_id) {
                debug!(pack_id, order_id = raw.id, "pack already consolidated in this page");
                continue;
            }
            match self.consolidate_pack(credential, pack_id).await {
                Ok(merged) => {
                    consolidated_packs.insert(pack_id);
                    if let Some(merged) = merged {
                        unified.push(merged);
                    }
                }
                Err(error) => {
                    // Consolidation is best-effort: the triggering order is
                    // emitted unmerged rather than dropped.
                    warn!(pack_id, %error, "pack consolidation failed, emitting the order unmerged");
                    unified.push(self.map_order_with_status(credential, raw).await?);
                }
            }
        }

        self.backfill_item_images(credential, &mut unified).await;

        let next_page_token = response
            .paging
            .and_then(|p| paging::next_page_token(p.offset, p.limit, p.total));
        Ok(Page {
            items: unified,
            next_page_token,
        })
    }

    #[instrument(skip(self, credential), fields(count = order_ids.len()))]
    async fn order_details(
        &self,
        credential: &Credential,
        order_ids: &[String],
    ) -> Result<Vec<UnifiedOrder>, IntegrationError> {
        let mut results = Vec::with_capacity(order_ids.len());
        for id in order_ids {
            // Try the id as a plain order first; a miss falls through to the
            // pack interpretation.
            if let Some(raw) = self.fetch_order(credential, id).await? {
                results.push(self.map_order_with_status(credential, &raw).await?);
                continue;
            }
            match self.fetch_pack(credential, id).await? {
                Some(pack) if !pack.orders.is_empty() => {
                    let member_ids: Vec<String> =
                        pack.orders.iter().map(|o| o.id.to_string()).collect();
                    let members = self.fetch_members(credential, &member_ids).await;
                    if let Some(merged) = merge_pack(id, &members) {
                        results.push(merged);
                    }
                }
                _ => {
                    // Neither interpretation resolved; the id is dropped from
                    // the result rather than failing the batch.
                    warn!(id, "id is neither a valid order nor a pack");
                }
            }
        }
        Ok(results)
    }
}

impl MercadoLibreAdapter {
    /// Fetch one order, `None` on a 404 miss.
    pub(super) async fn fetch_order(
        &self,
        credential: &Credential,
        order_id: &str,
    ) -> Result<Option<MercadoLibreOrder>, IntegrationError> {
        let request = self.bearer_get(credential, &format!("/orders/{order_id}"), &[])?;
        match self.http.execute_json(request).await {
            Ok(order) => Ok(Some(order)),
            Err(error) if error.is_not_found() => {
                debug!(order_id, "order not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Map an order and apply the shipment-status preference: when a shipment
    /// exists, its status describes the fulfillment stage more accurately
    /// than the order's own.
    pub(super) async fn map_order_with_status(
        &self,
        credential: &Credential,
        raw: &MercadoLibreOrder,
    ) -> Result<UnifiedOrder, IntegrationError> {
        let mut unified = map_order(raw);
        if let Some(shipping_id) = raw.shipping.as_ref().and_then(|s| s.id) {
            let shipment = self
                .fetch_shipment(credential, &shipping_id.to_string())
                .await?;
            if let Some(status) = shipment
                .and_then(|s| s.status)
                .filter(|status| !status.is_empty())
            {
                unified.unified_status = to_unified_status(&status);
                unified.original_status = Some(status);
            }
        }
        Ok(unified)
    }

    /// Backfill item image URLs from the multiget endpoint, twenty ids per
    /// call. A failed batch only leaves its images unfilled; the listing
    /// itself never fails here.
    pub(super) async fn backfill_item_images(
        &self,
        credential: &Credential,
        orders: &mut [UnifiedOrder],
    ) {
        let mut item_ids: Vec<String> = orders
            .iter()
            .flat_map(|order| order.items.iter())
            .filter_map(|item| item.product_id.clone())
            .collect();
        item_ids.sort();
        item_ids.dedup();
        if item_ids.is_empty() {
            return;
        }

        let mut images: HashMap<String, String> = HashMap::new();
        for batch in item_ids.chunks(ITEM_DETAIL_BATCH_SIZE) {
            let ids = batch.join(",");
            let request = match self.bearer_get(credential, "/items", &[("ids", ids.clone())]) {
                Ok(request) => request,
                Err(error) => {
                    warn!(%error, "could not build item detail request");
                    continue;
                }
            };
            match self
                .http
                .execute_json::<Vec<MercadoLibreItemMultigetEntry>>(request)
                .await
            {
                Ok(entries) => {
                    for entry in entries {
                        if entry.code == Some(200)
                            && let Some(body) = entry.body
                            && let Some(url) =
                                body.pictures.first().and_then(|p| p.secure_url.clone())
                        {
                            images.insert(body.id, url);
                        }
                    }
                }
                Err(error) => {
                    warn!(ids = %ids, %error, "item detail batch failed, images left unfilled");
                }
            }
        }

        for order in orders {
            for item in &mut order.items {
                if let Some(product_id) = &item.product_id
                    && let Some(url) = images.get(product_id)
                {
                    item.image_url = Some(url.clone());
                }
            }
        }
    }
}

/// Map one Mercado Libre order into the unified shape. Pure: mapping the
/// same payload twice yields field-for-field identical results. The
/// shipment-status preference is applied separately since it needs another
/// API call.
pub(super) fn map_order(order: &MercadoLibreOrder) -> UnifiedOrder {
    let mut unified = UnifiedOrder {
        order_id: order.id.to_string(),
        original_status: order.status.clone(),
        unified_status: order
            .status
            .as_deref()
            .map(to_unified_status)
            .unwrap_or_default(),
        created_at: order.date_created.as_deref().and_then(parse_instant),
        updated_at: order.date_closed.as_deref().and_then(parse_instant),
        ..UnifiedOrder::default()
    };

    if let Some(payment) = order.payments.first() {
        unified.currency = payment.currency_id.clone();
        unified.total_amount = payment.transaction_amount;
    }
    unified.buyer = order.buyer.as_ref().and_then(buyer_display);

    unified.items = order
        .order_items
        .iter()
        .map(|line| {
            let item = line.item.as_ref();
            UnifiedOrderItem {
                // Mercado Libre has no separate line id; the item id doubles
                // as one. The seller SKU is both sku id and name.
                line_id: item.and_then(|i| i.id.clone()),
                product_id: item.and_then(|i| i.id.clone()),
                product_name: item.and_then(|i| i.title.clone()),
                sku_id: item.and_then(|i| i.seller_sku.clone()),
                sku_name: item.and_then(|i| i.seller_sku.clone()),
                // Orders carry no images; filled by the item-detail backfill.
                image_url: None,
                quantity: line.quantity.unwrap_or(1),
                unit_price: line.unit_price,
            }
        })
        .collect();

    let mut shipment = UnifiedShipment::default();
    if let Some(shipping) = &order.shipping
        && let Some(shipping_id) = shipping.id
    {
        // The shipping id drives every later fulfillment operation.
        shipment.shipment_id = Some(shipping_id.to_string());
        if let Some(address) = &shipping.receiver_address {
            shipment.shipping_address = Some(UnifiedAddress {
                full_name: address.receiver_name.clone(),
                phone: address.receiver_phone.clone(),
                street: street_display(address),
                zip_code: address.zip_code.clone(),
                country_code: address.country.as_ref().and_then(|c| c.id.clone()),
                ..UnifiedAddress::default()
            });
        }
    }
    unified.shipment = shipment;

    if let Ok(raw) = serde_json::to_value(order) {
        unified.raw.insert("original_order".to_string(), raw);
    }

    unified
}

/// Truncate to the hour, as the search endpoint indexes order dates hourly.
fn hour_window(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:00:00Z").to_string()
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(error) => {
            warn!(value, %error, "unparseable date in Mercado Libre payload");
            None
        }
    }
}

fn buyer_display(buyer: &MercadoLibreBuyer) -> Option<String> {
    let name = [buyer.first_name.as_deref(), buyer.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { None } else { Some(name) }
}

/// Street line composed from the split address parts the platform returns.
fn street_display(address: &MercadoLibreReceiverAddress) -> Option<String> {
    let street = [
        address.address_line.as_deref(),
        address.city.as_ref().and_then(|c| c.name.as_deref()),
        address.state.as_ref().and_then(|s| s.name.as_deref()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");
    if street.is_empty() { None } else { Some(street) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderhub_core::UnifiedOrderStatus;
    use rust_decimal::Decimal;

    fn sample_order() -> MercadoLibreOrder {
        serde_json::from_value(serde_json::json!({
            "id": 2_000_001_234_567_890_i64,
            "status": "paid",
            "date_created": "2024-03-05T10:20:30.000-04:00",
            "date_closed": "2024-03-05T10:25:00.000-04:00",
            "order_items": [{
                "item": {
                    "id": "MLM123",
                    "title": "Cable USB-C",
                    "seller_sku": "CBL-USC"
                },
                "quantity": 3,
                "unit_price": 120.5
            }],
            "payments": [{"transaction_amount": 361.5, "currency_id": "MXN"}],
            "buyer": {"first_name": "Ana", "last_name": "Gomez"},
            "shipping": {
                "id": 40_123_456_789_i64,
                "receiver_address": {
                    "address_line": "Av. Insurgentes 100",
                    "zip_code": "03100",
                    "city": {"name": "CDMX"},
                    "state": {"name": "Ciudad de Mexico"},
                    "country": {"id": "MX"},
                    "receiver_name": "Ana Gomez",
                    "receiver_phone": "+52 55 1111 2222"
                }
            }
        }))
        .expect("sample deserializes")
    }

    #[test]
    fn test_map_order_fields() {
        let unified = map_order(&sample_order());
        assert_eq!(unified.order_id, "2000001234567890");
        assert_eq!(unified.unified_status, UnifiedOrderStatus::ReadyForFulfillment);
        assert_eq!(unified.buyer.as_deref(), Some("Ana Gomez"));
        assert_eq!(unified.currency.as_deref(), Some("MXN"));
        assert_eq!(
            unified.total_amount,
            Some(Decimal::new(3615, 1)) // 361.5
        );
        assert_eq!(
            unified.created_at.map(|t| t.to_rfc3339()),
            Some("2024-03-05T14:20:30+00:00".to_string())
        );

        let item = unified.items.first().expect("one item");
        assert_eq!(item.line_id.as_deref(), Some("MLM123"));
        assert_eq!(item.sku_name.as_deref(), Some("CBL-USC"));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image_url, None);

        assert_eq!(unified.shipment.shipment_id.as_deref(), Some("40123456789"));
        let address = unified
            .shipment
            .shipping_address
            .as_ref()
            .expect("address mapped");
        assert_eq!(
            address.street.as_deref(),
            Some("Av. Insurgentes 100, CDMX, Ciudad de Mexico")
        );
        assert_eq!(address.country_code.as_deref(), Some("MX"));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let order = sample_order();
        assert_eq!(map_order(&order), map_order(&order));
    }

    #[test]
    fn test_unparseable_date_maps_to_none() {
        let mut order = sample_order();
        order.date_created = Some("yesterday-ish".to_string());
        assert_eq!(map_order(&order).created_at, None);
    }

    #[test]
    fn test_buyer_display_skips_missing_parts() {
        let buyer: MercadoLibreBuyer =
            serde_json::from_value(serde_json::json!({"first_name": "Ana"})).unwrap();
        assert_eq!(buyer_display(&buyer).as_deref(), Some("Ana"));

        let empty: MercadoLibreBuyer = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(buyer_display(&empty), None);
    }

    #[test]
    fn test_hour_window_truncates() {
        let instant = DateTime::parse_from_rfc3339("2024-03-05T10:20:30Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(hour_window(instant), "2024-03-05T10:00:00Z");
    }
}
