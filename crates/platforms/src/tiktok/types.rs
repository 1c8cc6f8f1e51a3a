//! TikTok Shop wire types.
//!
//! Unknown fields are tolerated everywhere (serde default) for forward
//! compatibility with vendor schema additions.

use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;

/// Envelope every TikTok API response arrives in. `code == 0` is success;
/// anything else carries a platform error message.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct TikTokApiResponse<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> TikTokApiResponse<T> {
    /// Unwrap the payload, turning a non-zero envelope code into a typed
    /// error.
    pub(crate) fn into_data(self) -> Result<Option<T>, IntegrationError> {
        if self.code != 0 {
            return Err(IntegrationError::Api {
                code: self.code,
                message: self.message,
                request_id: self.request_id,
            });
        }
        Ok(self.data)
    }
}

/// Token payload from the code-exchange and refresh endpoints.
///
/// Expiries are absolute epoch seconds, not lifetimes.
#[derive(Debug, Deserialize)]
pub(crate) struct TikTokTokenData {
    pub access_token: String,
    #[serde(default)]
    pub access_token_expire_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expire_in: Option<i64>,
    /// Seller open id.
    #[serde(default)]
    pub open_id: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

/// Payload of the authorized-shops endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TikTokShopInfoData {
    #[serde(default)]
    pub shops: Vec<TikTokShop>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TikTokShop {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// The shop cipher required on signed requests.
    #[serde(default)]
    pub cipher: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub seller_type: Option<String>,
}

/// Payload shared by the order search and order detail endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct TikTokOrderListData {
    #[serde(default)]
    pub orders: Vec<TikTokOrder>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A TikTok order as returned by the order endpoints.
///
/// Also serialized back into the unified order's raw-data map, so both
/// derives are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TikTokOrder {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub create_time: Option<i64>,
    /// Epoch seconds.
    #[serde(default)]
    pub update_time: Option<i64>,
    #[serde(default)]
    pub shipping_provider: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub recipient_address: Option<TikTokRecipientAddress>,
    #[serde(default)]
    pub payment: Option<TikTokPayment>,
    #[serde(default)]
    pub line_items: Vec<TikTokLineItem>,
    #[serde(default)]
    pub packages: Vec<TikTokPackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TikTokRecipientAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub region_code: Option<String>,
}

/// Order-level payment summary. Amounts are decimal strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TikTokPayment {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub total_amount: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TikTokLineItem {
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub sku_id: Option<String>,
    #[serde(default)]
    pub sku_name: Option<String>,
    #[serde(default)]
    pub seller_sku: Option<String>,
    /// Decimal string.
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub sku_image: Option<String>,
    #[serde(default)]
    pub package_id: Option<String>,
}

/// A package attached to an order; fulfillment operates on package ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TikTokPackage {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload of the shipping-documents endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TikTokShippingDocument {
    #[serde(default)]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// Payload of the order tracking endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TikTokTrackingData {
    #[serde(default)]
    pub tracking: Vec<TikTokTrackingEvent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TikTokTrackingEvent {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub update_time_millis: Option<i64>,
}
