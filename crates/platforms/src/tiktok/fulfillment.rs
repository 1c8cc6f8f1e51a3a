//! TikTok Shop fulfillment.
//!
//! TikTok runs its own logistics: the warehouse downloads the platform-issued
//! label and hands the package to the platform's carrier. Orders that sit in
//! `AWAITING_SHIPMENT` without a label yet can be nudged through the ship
//! trigger, after which the label is re-checked exactly once.

use async_trait::async_trait;
use orderhub_core::{Credential, FulfillmentAction, TrackingInfo};
use tracing::{info, instrument};

use super::TikTokAdapter;
use super::types::{TikTokApiResponse, TikTokOrder, TikTokShippingDocument};
use crate::error::IntegrationError;
use crate::services::FulfillmentService;

/// Vendor status meaning "paid, waiting for the seller to ship".
const AWAITING_SHIPMENT: &str = "AWAITING_SHIPMENT";

#[async_trait]
impl FulfillmentService for TikTokAdapter {
    #[instrument(skip(self, credential), fields(order_id = %order_id))]
    async fn prepare_fulfillment(
        &self,
        credential: &Credential,
        order_id: &str,
        auto_ship_if_missing: bool,
    ) -> Result<FulfillmentAction, IntegrationError> {
        let orders = self
            .raw_order_details(credential, &[order_id.to_string()])
            .await?;
        let order = orders
            .first()
            .ok_or_else(|| IntegrationError::NotFound(format!("order {order_id}")))?;
        let package = order
            .packages
            .first()
            .ok_or_else(|| IntegrationError::NoShipment(order_id.to_string()))?;

        // One ship-trigger budget, not recursion: the label is re-checked at
        // most once after a successful trigger.
        let mut ship_attempts_left = u8::from(auto_ship_if_missing);
        loop {
            let document = self.shipping_document(credential, &package.id).await?;
            if let Some(document) = document
                && let Some(doc_url) = document.doc_url.as_deref().filter(|u| !u.is_empty())
            {
                let label = self.http.execute_bytes(doc_url).await?;
                return Ok(FulfillmentAction::DownloadLabel {
                    label,
                    mime_type: "application/pdf".to_string(),
                    tracking_number: document.tracking_number.unwrap_or_default(),
                    receiver_name: receiver_name(order),
                });
            }

            if ship_attempts_left > 0 && order.status.as_deref() == Some(AWAITING_SHIPMENT) {
                ship_attempts_left -= 1;
                if self.trigger_ship(credential, &package.id).await? {
                    continue;
                }
            }

            return Ok(FulfillmentAction::Error {
                message: format!("no shipping label available for order {order_id}"),
            });
        }
    }

    #[instrument(skip(self, credential, tracking), fields(order_id = %order_id))]
    async fn submit_tracking(
        &self,
        credential: &Credential,
        order_id: &str,
        tracking: &TrackingInfo,
    ) -> Result<(), IntegrationError> {
        let orders = self
            .raw_order_details(credential, &[order_id.to_string()])
            .await?;
        let order = orders
            .first()
            .ok_or_else(|| IntegrationError::NotFound(format!("order {order_id}")))?;
        let package = order
            .packages
            .first()
            .ok_or_else(|| IntegrationError::NoShipment(order_id.to_string()))?;

        let path = format!("/fulfillment/202309/packages/{}/ship", package.id);
        let body = serde_json::json!({
            "tracking_number": tracking.tracking_number,
            "shipping_provider_id": tracking.shipping_provider_id,
        })
        .to_string();

        let request = self.signed_post(&path, credential, &[], body, true)?;
        let response: TikTokApiResponse<serde_json::Value> =
            self.http.execute_json(request).await?;
        response.into_data()?;
        info!(package_id = %package.id, "tracking number submitted");
        Ok(())
    }
}

impl TikTokAdapter {
    /// Ask for the package's shipping label document.
    ///
    /// The envelope code is deliberately not validated here: a package
    /// without a label yet answers with a non-zero code, which for this flow
    /// just means "no label".
    async fn shipping_document(
        &self,
        credential: &Credential,
        package_id: &str,
    ) -> Result<Option<TikTokShippingDocument>, IntegrationError> {
        let path = format!("/fulfillment/202309/packages/{package_id}/shipping_documents");
        let params = [
            ("document_type", "SHIPPING_LABEL".to_string()),
            ("document_size", "A6".to_string()),
            ("document_format", "PDF".to_string()),
        ];
        let request = self.signed_get(&path, credential, &params, true)?;
        let response: TikTokApiResponse<TikTokShippingDocument> =
            self.http.execute_json(request).await?;
        Ok(response.data)
    }

    /// Trigger platform shipping for a package. Returns whether the platform
    /// accepted the trigger.
    async fn trigger_ship(
        &self,
        credential: &Credential,
        package_id: &str,
    ) -> Result<bool, IntegrationError> {
        let path = format!("/fulfillment/202309/packages/{package_id}/ship");
        let request = self.signed_post(&path, credential, &[], String::new(), true)?;
        let response: TikTokApiResponse<serde_json::Value> =
            self.http.execute_json(request).await?;
        Ok(response.code == 0)
    }
}

fn receiver_name(order: &TikTokOrder) -> String {
    order
        .recipient_address
        .as_ref()
        .and_then(|address| address.name.clone())
        .unwrap_or_default()
}
