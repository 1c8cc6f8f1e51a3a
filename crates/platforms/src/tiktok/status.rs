//! TikTok Shop order-status normalization.

use orderhub_core::UnifiedOrderStatus;

/// Vendor status -> unified status. Append-only; anything unlisted maps to
/// `Unknown`.
const STATUS_MAP: &[(&str, UnifiedOrderStatus)] = &[
    ("UNPAID", UnifiedOrderStatus::PendingPayment),
    ("ON_HOLD", UnifiedOrderStatus::PendingApproval),
    ("AWAITING_SHIPMENT", UnifiedOrderStatus::ReadyForFulfillment),
    ("AWAITING_COLLECTION", UnifiedOrderStatus::ReadyForFulfillment),
    ("IN_TRANSIT", UnifiedOrderStatus::InTransit),
    ("DELIVERED", UnifiedOrderStatus::Delivered),
    ("COMPLETED", UnifiedOrderStatus::Completed),
    ("CANCELLED", UnifiedOrderStatus::Cancelled),
];

/// Normalize a TikTok order status. Total: never fails.
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
        assert_eq!(
            to_unified_status("AWAITING_SHIPMENT"),
            UnifiedOrderStatus::ReadyForFulfillment
        );
        assert_eq!(to_unified_status("UNPAID"), UnifiedOrderStatus::PendingPayment);
        assert_eq!(to_unified_status("COMPLETED"), UnifiedOrderStatus::Completed);
    }

    #[test]
    fn test_unmapped_status_is_unknown() {
        assert_eq!(to_unified_status("SOMETHING_NEW"), UnifiedOrderStatus::Unknown);
        assert_eq!(to_unified_status(""), UnifiedOrderStatus::Unknown);
        // Lookup is case-sensitive, as the platform emits upper snake case
        assert_eq!(to_unified_status("delivered"), UnifiedOrderStatus::Unknown);
    }
}
