//! Mercado Libre logistics tracking.
//!
//! The shipment history endpoint reports milestone timestamps rather than a
//! free-form event feed; each present milestone becomes one tracking event
//! with a fixed description, sorted ascending by time. The endpoint carries
//! no location data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderhub_core::{Credential, UnifiedShipment, UnifiedTrackingEvent};
use tracing::{instrument, warn};

use super::MercadoLibreAdapter;
use super::types::{MercadoLibreDateHistory, MercadoLibreShipmentHistory};
use crate::error::IntegrationError;
use crate::services::LogisticsService;

#[async_trait]
impl LogisticsService for MercadoLibreAdapter {
    #[instrument(skip(self, credential), fields(order_id = %order_id))]
    async fn tracking_events(
        &self,
        credential: &Credential,
        order_id: &str,
    ) -> Result<UnifiedShipment, IntegrationError> {
        let Some(shipment_id) = self.resolve_shipment_id(credential, order_id).await? else {
            warn!(order_id, "order has no shipment, no tracking to report");
            return Ok(UnifiedShipment::default());
        };
        let Some(shipment) = self.fetch_shipment(credential, &shipment_id).await? else {
            return Ok(UnifiedShipment::default());
        };

        let mut unified = UnifiedShipment {
            shipment_id: Some(shipment_id.clone()),
            tracking_number: shipment.tracking_number,
            carrier: shipment.tracking_method,
            ..UnifiedShipment::default()
        };

        let request =
            self.bearer_get(credential, &format!("/shipments/{shipment_id}/history"), &[])?;
        let history: MercadoLibreShipmentHistory = self.http.execute_json(request).await?;
        if let Some(dates) = history.date_history {
            unified.tracking_events = milestone_events(&dates);
        }
        Ok(unified)
    }
}

/// Milestone field -> human description, in lifecycle order.
fn milestone_events(dates: &MercadoLibreDateHistory) -> Vec<UnifiedTrackingEvent> {
    let milestones: [(&Option<String>, &str); 9] = [
        (&dates.date_created, "Order created, package is being prepared"),
        (&dates.date_first_printed, "Shipping label printed by seller"),
        (&dates.date_handling, "Package handling at fulfillment center"),
        (&dates.date_ready_to_ship, "Package ready to be shipped"),
        (&dates.date_shipped, "Package shipped, leaving fulfillment center"),
        (&dates.date_delivered, "Package delivered successfully"),
        (&dates.date_not_delivered, "Package delivery attempt failed"),
        (&dates.date_cancelled, "Shipment has been cancelled"),
        (&dates.date_returned, "Package has been returned"),
    ];

    let mut events: Vec<UnifiedTrackingEvent> = milestones
        .into_iter()
        .filter_map(|(date, description)| {
            let raw = date.as_deref().filter(|d| !d.is_empty())?;
            let time = parse_milestone(raw)?;
            Some(UnifiedTrackingEvent {
                description: description.to_string(),
                time,
                // The history endpoint carries no location data.
                location: None,
            })
        })
        .collect();
    events.sort_by_key(|event| event.time);
    events
}

fn parse_milestone(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(error) => {
            warn!(value, %error, "unparseable milestone date, event skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_sorted_ascending() {
        let dates: MercadoLibreDateHistory = serde_json::from_value(serde_json::json!({
            "date_shipped": "2024-03-07T08:00:00.000-04:00",
            "date_created": "2024-03-05T10:00:00.000-04:00",
            "date_ready_to_ship": "2024-03-06T09:00:00.000-04:00"
        }))
        .unwrap();

        let events = milestone_events(&dates);
        let descriptions: Vec<_> = events.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Order created, package is being prepared",
                "Package ready to be shipped",
                "Package shipped, leaving fulfillment center",
            ]
        );
        assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_unparseable_milestone_is_skipped() {
        let dates: MercadoLibreDateHistory = serde_json::from_value(serde_json::json!({
            "date_created": "not-a-date",
            "date_delivered": "2024-03-08T12:00:00.000-04:00"
        }))
        .unwrap();

        let events = milestone_events(&dates);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].description, "Package delivered successfully");
    }

    #[test]
    fn test_empty_history_yields_no_events() {
        let events = milestone_events(&MercadoLibreDateHistory::default());
        assert!(events.is_empty());
    }
}
