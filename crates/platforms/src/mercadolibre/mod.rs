//! Mercado Libre adapter.
//!
//! Talks to the Mercado Libre marketplace API with plain bearer
//! authentication. Two things make this adapter the most involved one:
//!
//! - **Packs.** Several customer orders can ship as one physical package. A
//!   caller-supplied id may be an order id or a pack id, with no declaration
//!   of which; the pack module probes both interpretations and consolidates
//!   pack members into one logical order.
//! - **Status preference.** An order's own status only reflects pre-payment
//!   states accurately, so whenever a shipment exists its status wins.
//!
//! # Shipping model
//!
//! Mercado Envios issues the label: fulfillment downloads the PDF from the
//! label endpoint. Seller-shipped (ME1) orders report tracking through a
//! shipment update instead.

mod auth;
mod fulfillment;
mod logistics;
mod orders;
mod packs;
mod paging;
mod status;
mod types;

use orderhub_core::Credential;
use url::Url;

use crate::config::MercadoLibreConfig;
use crate::error::IntegrationError;
use crate::http::{HttpExecutor, require_access_token};

use types::MercadoLibreShipment;

/// Mercado Libre platform adapter.
///
/// Stateless: holds only read-only configuration and pooled HTTP clients, so
/// one instance serves concurrent callers.
pub struct MercadoLibreAdapter {
    config: MercadoLibreConfig,
    http: HttpExecutor,
}

impl MercadoLibreAdapter {
    /// Create an adapter from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: MercadoLibreConfig) -> Result<Self, IntegrationError> {
        Ok(Self {
            config,
            http: HttpExecutor::new()?,
        })
    }

    fn request_url(&self, path: &str) -> Result<Url, IntegrationError> {
        Ok(Url::parse(&format!("{}{}", self.config.api_base_url, path))?)
    }

    /// Build a bearer-authenticated GET request.
    fn bearer_get(
        &self,
        credential: &Credential,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::RequestBuilder, IntegrationError> {
        let token = require_access_token(credential)?;
        Ok(self
            .http
            .client()
            .get(self.request_url(path)?)
            .query(query)
            .bearer_auth(token))
    }

    /// Build a bearer-authenticated PUT request with a JSON body.
    fn bearer_put_json(
        &self,
        credential: &Credential,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::RequestBuilder, IntegrationError> {
        let token = require_access_token(credential)?;
        Ok(self
            .http
            .client()
            .put(self.request_url(path)?)
            .bearer_auth(token)
            .json(body))
    }

    /// Fetch one shipment's details, `None` on a 404 miss.
    ///
    /// The `x-format-new` header opts into the current shipment schema and is
    /// mandatory on this endpoint.
    pub(crate) async fn fetch_shipment(
        &self,
        credential: &Credential,
        shipment_id: &str,
    ) -> Result<Option<MercadoLibreShipment>, IntegrationError> {
        let request = self
            .bearer_get(credential, &format!("/shipments/{shipment_id}"), &[])?
            .header("x-format-new", "true");
        match self.http.execute_json(request).await {
            Ok(shipment) => Ok(Some(shipment)),
            Err(error) if error.is_not_found() => {
                tracing::warn!(shipment_id, "shipment not found");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
