//! Unified order status.

use serde::{Deserialize, Serialize};

/// Order status normalized across platforms.
///
/// Every adapter carries a static lookup table from its vendor status strings
/// into this closed set; strings the table does not know map to [`Self::Unknown`]
/// rather than failing. The vendor's raw string is always preserved alongside
/// on the order for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnifiedOrderStatus {
    /// Awaiting seller or platform approval.
    PendingApproval,
    /// Awaiting buyer payment.
    PendingPayment,
    /// Paid and ready to be packed/shipped.
    ReadyForFulfillment,
    /// Handed to the carrier, in transit.
    InTransit,
    /// Delivered to the buyer.
    Delivered,
    /// Cancelled before completion.
    Cancelled,
    /// Completed (delivered and settled).
    Completed,
    /// Vendor status not recognized by the mapping table.
    #[default]
    Unknown,
}
