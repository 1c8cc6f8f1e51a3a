//! Unified shipment, address, and tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shipment information attached to a unified order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedShipment {
    /// Platform's shipment/package id. For Mercado Libre this is the key
    /// every fulfillment and logistics operation hangs off.
    pub shipment_id: Option<String>,
    /// Normalized shipment status.
    pub unified_status: Option<String>,
    /// Platform's raw shipment status.
    pub original_status: Option<String>,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
    /// Carrier name.
    pub carrier: Option<String>,
    /// Destination address.
    pub shipping_address: Option<UnifiedAddress>,
    /// Tracking events, ordered ascending by time.
    pub tracking_events: Vec<UnifiedTrackingEvent>,
}

/// A shipping address in the vendor-neutral shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedAddress {
    /// Recipient full name.
    pub full_name: Option<String>,
    /// Recipient phone number.
    pub phone: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Province or state.
    pub province: Option<String>,
    /// City.
    pub city: Option<String>,
    /// District or county.
    pub district: Option<String>,
    /// Street address detail.
    pub street: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
}

/// One milestone on a shipment's journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedTrackingEvent {
    /// What happened.
    pub description: String,
    /// When it happened.
    pub time: DateTime<Utc>,
    /// Where it happened, when the platform reports it.
    pub location: Option<String>,
}
