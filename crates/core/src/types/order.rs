//! Unified order and line-item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shipment::UnifiedShipment;
use super::status::UnifiedOrderStatus;

/// An order normalized into the vendor-neutral shape.
///
/// Built fresh from a live API response on every call. For consolidated
/// Mercado Libre packs, `order_id` is the pack id and the money/items are the
/// aggregate of the member orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedOrder {
    /// Platform's original order id (or pack id for consolidated orders).
    pub order_id: String,
    /// Normalized status.
    pub unified_status: UnifiedOrderStatus,
    /// Platform's raw status string, preserved for audit.
    pub original_status: Option<String>,
    /// Order creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Order last-update time.
    pub updated_at: Option<DateTime<Utc>>,
    /// ISO 4217 transaction currency.
    pub currency: Option<String>,
    /// Order total. Decimal, never floating point.
    pub total_amount: Option<Decimal>,
    /// Buyer display string (nickname or recipient name).
    pub buyer: Option<String>,
    /// Ordered line items.
    pub items: Vec<UnifiedOrderItem>,
    /// Shipment attached to this order.
    pub shipment: UnifiedShipment,
    /// Raw vendor payload, kept for debugging and traceability.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub raw: serde_json::Map<String, serde_json::Value>,
}

/// One purchased line on an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedOrderItem {
    /// Platform's line-item id.
    pub line_id: Option<String>,
    /// Product identifier.
    pub product_id: Option<String>,
    /// Product display name.
    pub product_name: Option<String>,
    /// Platform SKU id, distinguishes variants of one product.
    pub sku_id: Option<String>,
    /// SKU display name.
    pub sku_name: Option<String>,
    /// Product image URL. May be backfilled from a separate item-detail
    /// lookup after the order itself is mapped.
    pub image_url: Option<String>,
    /// Quantity purchased.
    pub quantity: u32,
    /// Unit price in the order currency.
    pub unit_price: Option<Decimal>,
}
