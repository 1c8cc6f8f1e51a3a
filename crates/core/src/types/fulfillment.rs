//! Fulfillment instructions exchanged with the warehouse.

use serde::{Deserialize, Serialize};

/// The instruction handed to the WMS after preparing an order for
/// fulfillment.
///
/// Exactly one variant applies per order: platforms that run their own
/// logistics hand back a printable label, platforms where the seller ships
/// expect the WMS to pick a carrier and report tracking via
/// `submit_tracking`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentAction {
    /// Download and print the platform-issued carrier label.
    DownloadLabel {
        /// Raw label document bytes.
        label: Vec<u8>,
        /// Label MIME type, e.g. `application/pdf`.
        mime_type: String,
        /// Tracking number printed on the label.
        tracking_number: String,
        /// Recipient name, for print-queue display.
        receiver_name: String,
    },
    /// Ship with an own carrier and report the tracking number back.
    ProvideTracking {
        /// Carriers the platform will accept a tracking number from.
        available_carriers: Vec<CarrierOption>,
    },
    /// Fulfillment could not be prepared.
    Error {
        /// Why preparation failed.
        message: String,
    },
}

impl FulfillmentAction {
    /// Whether this action is the error terminal state.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// A carrier the platform accepts tracking numbers from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierOption {
    /// Platform-side carrier id, echoed back in [`TrackingInfo`].
    pub id: String,
    /// Carrier display name.
    pub name: String,
}

/// Tracking details the WMS reports for a seller-shipped order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Carrier tracking number.
    pub tracking_number: String,
    /// Platform-side id of the carrier used.
    pub shipping_provider_id: Option<String>,
    /// Line-item ids covered by this package, for split shipments.
    pub order_line_item_ids: Vec<String>,
}
