//! Mercado Libre wire types.
//!
//! Ids are numeric on the wire; they are stringified at the unified-model
//! boundary. Unknown fields are tolerated everywhere for forward
//! compatibility.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order as returned by `/orders/{id}` and `/orders/search`.
///
/// Also serialized back into the unified order's raw-data map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreOrder {
    pub id: i64,
    #[serde(default)]
    pub status: Option<String>,
    /// ISO 8601 with offset.
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_closed: Option<String>,
    #[serde(default)]
    pub order_items: Vec<MercadoLibreOrderItem>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub currency_id: Option<String>,
    #[serde(default)]
    pub buyer: Option<MercadoLibreBuyer>,
    #[serde(default)]
    pub payments: Vec<MercadoLibrePayment>,
    #[serde(default)]
    pub shipping: Option<MercadoLibreOrderShipping>,
    /// Present when this order ships together with others as one pack.
    #[serde(default)]
    pub pack_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreOrderItem {
    #[serde(default)]
    pub item: Option<MercadoLibreItemRef>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    /// Non-null when the stock lives in a Mercado Libre fulfillment center
    /// (full), in which case the WMS never ships this order.
    #[serde(default)]
    pub stock: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreItemRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub seller_sku: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreBuyer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibrePayment {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<Decimal>,
    #[serde(default)]
    pub currency_id: Option<String>,
}

/// Shipping block embedded in an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreOrderShipping {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub receiver_address: Option<MercadoLibreReceiverAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreReceiverAddress {
    #[serde(default)]
    pub address_line: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<MercadoLibreNamedRef>,
    #[serde(default)]
    pub state: Option<MercadoLibreNamedRef>,
    #[serde(default)]
    pub country: Option<MercadoLibreNamedRef>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct MercadoLibreNamedRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `/orders/search` response.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreOrderSearchResponse {
    #[serde(default)]
    pub results: Vec<MercadoLibreOrder>,
    #[serde(default)]
    pub paging: Option<MercadoLibrePaging>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibrePaging {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

/// `/packs/{id}` response: the member orders and the shared shipment.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibrePack {
    #[serde(default)]
    pub orders: Vec<MercadoLibrePackOrderRef>,
    #[serde(default)]
    pub shipment: Option<MercadoLibrePackShipmentRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibrePackOrderRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibrePackShipmentRef {
    pub id: i64,
}

/// `/shipments/{id}` response (new format).
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreShipment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub substatus: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_method: Option<String>,
    #[serde(default)]
    pub destination: Option<MercadoLibreShipmentDestination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreShipmentDestination {
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
}

/// `/shipments/{id}/history` response.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreShipmentHistory {
    #[serde(default)]
    pub date_history: Option<MercadoLibreDateHistory>,
}

/// Milestone timestamps, each ISO 8601 with offset when present.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MercadoLibreDateHistory {
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_first_printed: Option<String>,
    #[serde(default)]
    pub date_handling: Option<String>,
    #[serde(default)]
    pub date_ready_to_ship: Option<String>,
    #[serde(default)]
    pub date_shipped: Option<String>,
    #[serde(default)]
    pub date_delivered: Option<String>,
    #[serde(default)]
    pub date_not_delivered: Option<String>,
    #[serde(default)]
    pub date_cancelled: Option<String>,
    #[serde(default)]
    pub date_returned: Option<String>,
}

/// `/oauth/token` response. `expires_in` is a lifetime in seconds, unlike
/// TikTok's absolute expiries.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreTokenData {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `/users/me` response.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreUserInfo {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub country_id: Option<String>,
    #[serde(default)]
    pub company: Option<MercadoLibreCompany>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreCompany {
    #[serde(default)]
    pub corporate_name: Option<String>,
}

/// One entry of the `/items?ids=` multiget response.
#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreItemMultigetEntry {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub body: Option<MercadoLibreItemDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibreItemDetail {
    pub id: String,
    #[serde(default)]
    pub pictures: Vec<MercadoLibrePicture>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MercadoLibrePicture {
    #[serde(default)]
    pub secure_url: Option<String>,
}
