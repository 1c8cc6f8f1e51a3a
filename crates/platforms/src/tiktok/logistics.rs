//! TikTok Shop logistics tracking.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use orderhub_core::{Credential, UnifiedShipment, UnifiedTrackingEvent};
use tracing::instrument;

use super::TikTokAdapter;
use super::types::{TikTokApiResponse, TikTokTrackingData};
use crate::error::IntegrationError;
use crate::services::LogisticsService;

#[async_trait]
impl LogisticsService for TikTokAdapter {
    #[instrument(skip(self, credential), fields(order_id = %order_id))]
    async fn tracking_events(
        &self,
        credential: &Credential,
        order_id: &str,
    ) -> Result<UnifiedShipment, IntegrationError> {
        let path = format!("/fulfillment/202309/orders/{order_id}/tracking");
        let request = self.signed_get(&path, credential, &[], true)?;
        let response: TikTokApiResponse<TikTokTrackingData> =
            self.http.execute_json(request).await?;

        let mut shipment = UnifiedShipment::default();
        let Some(data) = response.into_data()? else {
            return Ok(shipment);
        };

        shipment.tracking_events = data
            .tracking
            .into_iter()
            .filter_map(|event| {
                let time = event
                    .update_time_millis
                    .and_then(|millis| Utc.timestamp_millis_opt(millis).single())?;
                Some(UnifiedTrackingEvent {
                    description: event.description.unwrap_or_default(),
                    time,
                    location: event.location,
                })
            })
            .collect();
        Ok(shipment)
    }
}
