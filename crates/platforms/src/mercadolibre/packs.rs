//! Pack identity resolution and consolidation.
//!
//! A pack groups several customer orders into one physical shipment. Two
//! consequences for the unified contract:
//!
//! - An opaque caller-supplied id can denote an order or a pack. The probe
//!   here tries the order interpretation first and falls through to the pack
//!   interpretation on a 404 miss - "not found" is the routing signal, any
//!   other failure propagates.
//! - Listings must emit one logical order per pack. Members are fetched in
//!   parallel and reduced deterministically (map, filter failures out,
//!   merge), so the race between member fetches never changes the merged
//!   content.

use futures::future::join_all;
use orderhub_core::{Credential, UnifiedOrder};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::MercadoLibreAdapter;
use super::types::MercadoLibrePack;
use crate::error::IntegrationError;

impl MercadoLibreAdapter {
    /// Fetch a pack, `None` on a 404 miss.
    pub(super) async fn fetch_pack(
        &self,
        credential: &Credential,
        pack_id: &str,
    ) -> Result<Option<MercadoLibrePack>, IntegrationError> {
        let request = self.bearer_get(credential, &format!("/packs/{pack_id}"), &[])?;
        match self.http.execute_json(request).await {
            Ok(pack) => Ok(Some(pack)),
            Err(error) if error.is_not_found() => {
                debug!(pack_id, "pack not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Consolidate one pack into a single logical order.
    ///
    /// Returns `Ok(None)` when the pack has no members to merge. Member
    /// fetch failures are logged and the member excluded; only the pack
    /// lookup itself failing makes the whole consolidation fail.
    pub(super) async fn consolidate_pack(
        &self,
        credential: &Credential,
        pack_id: i64,
    ) -> Result<Option<UnifiedOrder>, IntegrationError> {
        let pack_key = pack_id.to_string();
        let pack = self
            .fetch_pack(credential, &pack_key)
            .await?
            .ok_or_else(|| IntegrationError::NotFound(format!("pack {pack_key}")))?;
        if pack.orders.is_empty() {
            return Ok(None);
        }

        let member_ids: Vec<String> = pack.orders.iter().map(|o| o.id.to_string()).collect();
        let members = self.fetch_members(credential, &member_ids).await;
        Ok(merge_pack(&pack_key, &members))
    }

    /// Fetch full details for every pack member, in parallel. A member that
    /// fails to load is excluded rather than failing the batch.
    pub(super) async fn fetch_members(
        &self,
        credential: &Credential,
        member_ids: &[String],
    ) -> Vec<UnifiedOrder> {
        let fetches = member_ids.iter().map(|member_id| async move {
            match self.fetch_order(credential, member_id).await {
                Ok(Some(raw)) => match self.map_order_with_status(credential, &raw).await {
                    Ok(order) => Some(order),
                    Err(error) => {
                        warn!(member_id, %error, "pack member could not be mapped, excluded");
                        None
                    }
                },
                Ok(None) => {
                    warn!(member_id, "pack member not found, excluded");
                    None
                }
                Err(error) => {
                    warn!(member_id, %error, "pack member fetch failed, excluded");
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Resolve an opaque id to the shipment id it implies.
    ///
    /// Dual-mode probe: an id that resolves as a plain order never reaches
    /// the pack interpretation; an order miss falls through to the pack;
    /// neither resolving yields `None` and the caller decides how to fail.
    pub(super) async fn resolve_shipment_id(
        &self,
        credential: &Credential,
        order_or_pack_id: &str,
    ) -> Result<Option<String>, IntegrationError> {
        if let Some(order) = self.fetch_order(credential, order_or_pack_id).await? {
            let shipment_id = order.shipping.and_then(|s| s.id).map(|id| id.to_string());
            debug!(id = order_or_pack_id, ?shipment_id, "id resolved as a plain order");
            return Ok(shipment_id);
        }

        match self.fetch_pack(credential, order_or_pack_id).await? {
            Some(pack) => {
                let shipment_id = pack.shipment.map(|s| s.id.to_string());
                info!(id = order_or_pack_id, ?shipment_id, "id resolved as a pack");
                Ok(shipment_id)
            }
            None => Ok(None),
        }
    }
}

/// Merge pack members into one logical order keyed by the pack id.
///
/// Buyer, timestamps, currency, status, and shipment come from the first
/// member - pack members share them by construction. Money and items
/// aggregate across members. Returns `None` for an empty member list.
pub(super) fn merge_pack(pack_id: &str, members: &[UnifiedOrder]) -> Option<UnifiedOrder> {
    let template = members.first()?;

    let mut merged = UnifiedOrder {
        order_id: pack_id.to_string(),
        unified_status: template.unified_status,
        original_status: template.original_status.clone(),
        created_at: template.created_at,
        updated_at: template.updated_at,
        currency: template.currency.clone(),
        buyer: template.buyer.clone(),
        shipment: template.shipment.clone(),
        ..UnifiedOrder::default()
    };

    let mut total = Decimal::ZERO;
    for member in members {
        if let Some(amount) = member.total_amount {
            total += amount;
        }
        merged.items.extend(member.items.iter().cloned());
    }
    merged.total_amount = Some(total);

    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderhub_core::{UnifiedOrderItem, UnifiedOrderStatus, UnifiedShipment};
    use std::str::FromStr;

    fn member(id: &str, total: &str, item_name: &str) -> UnifiedOrder {
        UnifiedOrder {
            order_id: id.to_string(),
            unified_status: UnifiedOrderStatus::ReadyForFulfillment,
            original_status: Some("ready_to_ship".to_string()),
            currency: Some("MXN".to_string()),
            buyer: Some("Ana Gomez".to_string()),
            total_amount: Some(Decimal::from_str(total).expect("valid decimal")),
            items: vec![UnifiedOrderItem {
                product_name: Some(item_name.to_string()),
                quantity: 1,
                ..UnifiedOrderItem::default()
            }],
            shipment: UnifiedShipment {
                shipment_id: Some("40123".to_string()),
                ..UnifiedShipment::default()
            },
            ..UnifiedOrder::default()
        }
    }

    #[test]
    fn test_merge_aggregates_money_and_items() {
        let members = vec![
            member("1", "10.00", "A"),
            member("2", "5.50", "B"),
            member("3", "2.25", "C"),
        ];
        let merged = merge_pack("2000000987654321", &members).expect("merge succeeds");

        assert_eq!(merged.order_id, "2000000987654321");
        assert_eq!(
            merged.total_amount,
            Some(Decimal::from_str("17.75").expect("valid decimal"))
        );
        let names: Vec<_> = merged
            .items
            .iter()
            .filter_map(|i| i.product_name.as_deref())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_merge_copies_shared_fields_from_first_member() {
        let members = vec![member("1", "10.00", "A"), member("2", "5.50", "B")];
        let merged = merge_pack("p-1", &members).expect("merge succeeds");

        assert_eq!(merged.buyer.as_deref(), Some("Ana Gomez"));
        assert_eq!(merged.currency.as_deref(), Some("MXN"));
        assert_eq!(merged.unified_status, UnifiedOrderStatus::ReadyForFulfillment);
        assert_eq!(merged.shipment.shipment_id.as_deref(), Some("40123"));
    }

    #[test]
    fn test_merge_of_no_members_is_none() {
        assert_eq!(merge_pack("p-1", &[]), None);
    }

    #[test]
    fn test_merge_treats_missing_totals_as_zero() {
        let mut partial = member("1", "10.00", "A");
        partial.total_amount = None;
        let members = vec![partial, member("2", "5.50", "B")];
        let merged = merge_pack("p-1", &members).expect("merge succeeds");
        assert_eq!(
            merged.total_amount,
            Some(Decimal::from_str("5.50").expect("valid decimal"))
        );
    }
}
