//! Mercado Libre status normalization.
//!
//! The table is keyed on shipment statuses first: the order-level status only
//! reflects pre-payment states accurately, so callers feed the shipment
//! status through here whenever one exists.

use orderhub_core::UnifiedOrderStatus;

/// Vendor status -> unified status. Append-only; anything unlisted maps to
/// `Unknown`.
const STATUS_MAP: &[(&str, UnifiedOrderStatus)] = &[
    // Order statuses (pre-payment)
    ("payment_required", UnifiedOrderStatus::PendingPayment),
    ("payment_in_process", UnifiedOrderStatus::PendingPayment),
    ("paid", UnifiedOrderStatus::ReadyForFulfillment),
    // Shipment statuses
    ("handling", UnifiedOrderStatus::ReadyForFulfillment),
    ("ready_to_ship", UnifiedOrderStatus::ReadyForFulfillment),
    ("shipped", UnifiedOrderStatus::InTransit),
    ("delivered", UnifiedOrderStatus::Delivered),
    // A failed delivery attempt still leaves the package with the carrier
    ("not_delivered", UnifiedOrderStatus::InTransit),
    ("cancelled", UnifiedOrderStatus::Cancelled),
];

/// Normalize a Mercado Libre order or shipment status. Total: never fails.
pub(crate) fn to_unified_status(status: &str) -> UnifiedOrderStatus {
    STATUS_MAP
        .iter()
        .find(|(vendor, _)| *vendor == status)
        .map_or(UnifiedOrderStatus::Unknown, |(_, unified)| *unified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(to_unified_status("paid"), UnifiedOrderStatus::ReadyForFulfillment);
        assert_eq!(to_unified_status("shipped"), UnifiedOrderStatus::InTransit);
        assert_eq!(to_unified_status("not_delivered"), UnifiedOrderStatus::InTransit);
        assert_eq!(to_unified_status("cancelled"), UnifiedOrderStatus::Cancelled);
    }

    #[test]
    fn test_unmapped_status_is_unknown() {
        assert_eq!(to_unified_status("under_review"), UnifiedOrderStatus::Unknown);
        assert_eq!(to_unified_status(""), UnifiedOrderStatus::Unknown);
    }
}
