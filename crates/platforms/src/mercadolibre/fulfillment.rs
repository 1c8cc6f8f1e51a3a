//! Mercado Libre fulfillment.
//!
//! Mercado Envios issues the shipping label, so fulfillment is: resolve the
//! shipment behind the (order or pack) id, load its details, download the
//! label PDF. There is no ship trigger on this platform -
//! `auto_ship_if_missing` has nothing to do.

use async_trait::async_trait;
use orderhub_core::{Credential, FulfillmentAction, TrackingInfo};
use tracing::{error, info, instrument};

use super::MercadoLibreAdapter;
use crate::error::IntegrationError;
use crate::http::require_access_token;
use crate::services::FulfillmentService;

#[async_trait]
impl FulfillmentService for MercadoLibreAdapter {
    #[instrument(skip(self, credential), fields(order_id = %order_id))]
    async fn prepare_fulfillment(
        &self,
        credential: &Credential,
        order_id: &str,
        _auto_ship_if_missing: bool,
    ) -> Result<FulfillmentAction, IntegrationError> {
        let shipment_id = self
            .resolve_shipment_id(credential, order_id)
            .await?
            .ok_or_else(|| IntegrationError::NoShipment(order_id.to_string()))?;

        let Some(shipment) = self.fetch_shipment(credential, &shipment_id).await? else {
            error!(order_id, shipment_id, "shipment details could not be loaded");
            return Ok(FulfillmentAction::Error {
                message: format!("shipment {shipment_id} for order {order_id} could not be loaded"),
            });
        };

        let token = require_access_token(credential)?;
        let label = self
            .http
            .execute_bytes_with_bearer(
                &format!("{}/shipment_labels", self.config.api_base_url),
                token,
                &[("shipment_ids", shipment_id.as_str()), ("response_type", "pdf")],
            )
            .await?;
        if label.is_empty() {
            error!(shipment_id, "label download returned an empty document");
            return Ok(FulfillmentAction::Error {
                message: format!("empty shipping label for shipment {shipment_id}"),
            });
        }

        Ok(FulfillmentAction::DownloadLabel {
            label,
            mime_type: "application/pdf".to_string(),
            // The label references the shipment id, not a carrier number.
            tracking_number: shipment
                .id
                .map_or_else(|| shipment_id.clone(), |id| id.to_string()),
            receiver_name: shipment
                .destination
                .and_then(|d| d.receiver_name)
                .unwrap_or_default(),
        })
    }

    #[instrument(skip(self, credential, tracking), fields(order_id = %order_id))]
    async fn submit_tracking(
        &self,
        credential: &Credential,
        order_id: &str,
        tracking: &TrackingInfo,
    ) -> Result<(), IntegrationError> {
        // Seller-shipped (ME1) path: update the shipment resource in place.
        let shipment_id = self
            .resolve_shipment_id(credential, order_id)
            .await?
            .ok_or_else(|| IntegrationError::NoShipment(order_id.to_string()))?;

        let body = serde_json::json!({
            "status": "shipped",
            "tracking_number": tracking.tracking_number,
            "tracking_method": tracking.shipping_provider_id,
        });
        let request = self.bearer_put_json(credential, &format!("/shipments/{shipment_id}"), &body)?;
        self.http.execute_json::<serde_json::Value>(request).await?;
        info!(shipment_id, tracking_number = %tracking.tracking_number, "tracking number submitted");
        Ok(())
    }
}
