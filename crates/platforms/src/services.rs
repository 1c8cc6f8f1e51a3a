//! Capability traits implemented once per platform.
//!
//! The contract is split by responsibility - authorization, orders,
//! fulfillment, logistics - so a future platform can ship a partial adapter
//! (orders only, say) without stubbing the rest. The built-in adapters
//! implement all four.

use async_trait::async_trait;
use orderhub_core::{
    Credential, FulfillmentAction, OrderQuery, Page, TrackingInfo, UnifiedOrder, UnifiedShipment,
    UnifiedShopInfo,
};
use url::Url;

use crate::error::IntegrationError;

/// OAuth authorization flow for one platform.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Build the URL the seller visits to authorize the application.
    ///
    /// `state` is an opaque anti-CSRF token the platform passes back
    /// unmodified on the redirect.
    fn authorization_url(&self, state: &str) -> Url;

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::AuthExchange`] if the platform rejects the
    /// code; transport failures propagate unchanged.
    async fn exchange_code(&self, code: &str) -> Result<Credential, IntegrationError>;

    /// Mint a new credential from the refresh token.
    ///
    /// Tokens are immutable values: the input credential is left untouched
    /// and a replacement is returned for the WMS to persist. Platforms that
    /// do not rotate the refresh token get the prior one carried forward.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::RefreshUnavailable`] if the credential has
    /// no refresh token.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, IntegrationError>;

    /// Fetch the seller/shop profile behind this credential.
    ///
    /// Returns `None` when the platform reports no shop for the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying request fails.
    async fn shop_info(
        &self,
        credential: &Credential,
    ) -> Result<Option<UnifiedShopInfo>, IntegrationError>;
}

/// Order retrieval for one platform.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// List orders matching `query`, one page at a time.
    ///
    /// Follow `next_page_token` until `None` to walk the full result set.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::InvalidPageParams`] for out-of-bounds page
    /// sizes or malformed page tokens; transport failures propagate.
    async fn orders(
        &self,
        credential: &Credential,
        query: &OrderQuery,
    ) -> Result<Page<UnifiedOrder>, IntegrationError>;

    /// Fetch full details for explicit order ids.
    ///
    /// Ids that do not resolve on the platform are omitted from the result
    /// rather than failing the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying request fails.
    async fn order_details(
        &self,
        credential: &Credential,
        order_ids: &[String],
    ) -> Result<Vec<UnifiedOrder>, IntegrationError>;
}

/// Fulfillment preparation and seller-ships tracking submission.
#[async_trait]
pub trait FulfillmentService: Send + Sync {
    /// Decide what the warehouse must do to ship `order_id`.
    ///
    /// When the platform runs logistics the result carries the printable
    /// label; when no label exists and `auto_ship_if_missing` is set, the
    /// platform's ship trigger is invoked once and the label re-checked once.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::NoShipment`] when the order has no
    /// shippable unit; transport failures propagate.
    async fn prepare_fulfillment(
        &self,
        credential: &Credential,
        order_id: &str,
        auto_ship_if_missing: bool,
    ) -> Result<FulfillmentAction, IntegrationError>;

    /// Report a seller-shipped package's tracking details to the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the submission.
    async fn submit_tracking(
        &self,
        credential: &Credential,
        order_id: &str,
        tracking: &TrackingInfo,
    ) -> Result<(), IntegrationError>;
}

/// Post-shipment logistics tracking.
#[async_trait]
pub trait LogisticsService: Send + Sync {
    /// Fetch the tracking-event history for an order's shipment.
    ///
    /// Returns an empty shipment when the order has no logistics data yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying request fails.
    async fn tracking_events(
        &self,
        credential: &Credential,
        order_id: &str,
    ) -> Result<UnifiedShipment, IntegrationError>;
}
