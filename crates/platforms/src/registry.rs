//! Platform-to-adapter registry.
//!
//! Explicit maps built once at startup replace any runtime name matching:
//! every capability lookup is a `HashMap` hit keyed by
//! [`Platform`](orderhub_core::Platform), and an unregistered platform is a
//! typed error rather than a panic.

use std::collections::HashMap;
use std::sync::Arc;

use orderhub_core::Platform;

use crate::config::{MercadoLibreConfig, TikTokConfig};
use crate::error::IntegrationError;
use crate::mercadolibre::MercadoLibreAdapter;
use crate::services::{AuthorizationService, FulfillmentService, LogisticsService, OrderService};
use crate::tiktok::TikTokAdapter;

/// Read-only registry of platform adapters, one map per capability.
pub struct PlatformRegistry {
    authorization: HashMap<Platform, Arc<dyn AuthorizationService>>,
    orders: HashMap<Platform, Arc<dyn OrderService>>,
    fulfillment: HashMap<Platform, Arc<dyn FulfillmentService>>,
    logistics: HashMap<Platform, Arc<dyn LogisticsService>>,
}

impl PlatformRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> PlatformRegistryBuilder {
        PlatformRegistryBuilder::default()
    }

    /// Build a registry with both built-in adapters registered.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter's HTTP client cannot be constructed.
    pub fn with_default_adapters(
        tiktok: TikTokConfig,
        mercadolibre: MercadoLibreConfig,
    ) -> Result<Self, IntegrationError> {
        let tiktok = Arc::new(TikTokAdapter::new(tiktok)?);
        let mercadolibre = Arc::new(MercadoLibreAdapter::new(mercadolibre)?);
        Ok(Self::builder()
            .register_full(Platform::TikTokShop, tiktok)
            .register_full(Platform::MercadoLibre, mercadolibre)
            .build())
    }

    /// Look up the authorization service for a platform.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::UnsupportedPlatform`] when nothing is
    /// registered.
    pub fn authorization(
        &self,
        platform: Platform,
    ) -> Result<Arc<dyn AuthorizationService>, IntegrationError> {
        self.authorization
            .get(&platform)
            .cloned()
            .ok_or(IntegrationError::UnsupportedPlatform {
                platform,
                service: "authorization",
            })
    }

    /// Look up the order service for a platform.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::UnsupportedPlatform`] when nothing is
    /// registered.
    pub fn orders(&self, platform: Platform) -> Result<Arc<dyn OrderService>, IntegrationError> {
        self.orders
            .get(&platform)
            .cloned()
            .ok_or(IntegrationError::UnsupportedPlatform {
                platform,
                service: "order",
            })
    }

    /// Look up the fulfillment service for a platform.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::UnsupportedPlatform`] when nothing is
    /// registered.
    pub fn fulfillment(
        &self,
        platform: Platform,
    ) -> Result<Arc<dyn FulfillmentService>, IntegrationError> {
        self.fulfillment
            .get(&platform)
            .cloned()
            .ok_or(IntegrationError::UnsupportedPlatform {
                platform,
                service: "fulfillment",
            })
    }

    /// Look up the logistics service for a platform.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::UnsupportedPlatform`] when nothing is
    /// registered.
    pub fn logistics(
        &self,
        platform: Platform,
    ) -> Result<Arc<dyn LogisticsService>, IntegrationError> {
        self.logistics
            .get(&platform)
            .cloned()
            .ok_or(IntegrationError::UnsupportedPlatform {
                platform,
                service: "logistics",
            })
    }
}

/// Builder for [`PlatformRegistry`].
#[derive(Default)]
pub struct PlatformRegistryBuilder {
    authorization: HashMap<Platform, Arc<dyn AuthorizationService>>,
    orders: HashMap<Platform, Arc<dyn OrderService>>,
    fulfillment: HashMap<Platform, Arc<dyn FulfillmentService>>,
    logistics: HashMap<Platform, Arc<dyn LogisticsService>>,
}

impl PlatformRegistryBuilder {
    /// Register an adapter implementing all four capabilities.
    #[must_use]
    pub fn register_full<A>(mut self, platform: Platform, adapter: Arc<A>) -> Self
    where
        A: AuthorizationService + OrderService + FulfillmentService + LogisticsService + 'static,
    {
        self.authorization.insert(platform, adapter.clone());
        self.orders.insert(platform, adapter.clone());
        self.fulfillment.insert(platform, adapter.clone());
        self.logistics.insert(platform, adapter);
        self
    }

    /// Register only an authorization service.
    #[must_use]
    pub fn register_authorization(
        mut self,
        platform: Platform,
        service: Arc<dyn AuthorizationService>,
    ) -> Self {
        self.authorization.insert(platform, service);
        self
    }

    /// Register only an order service.
    #[must_use]
    pub fn register_orders(mut self, platform: Platform, service: Arc<dyn OrderService>) -> Self {
        self.orders.insert(platform, service);
        self
    }

    /// Register only a fulfillment service.
    #[must_use]
    pub fn register_fulfillment(
        mut self,
        platform: Platform,
        service: Arc<dyn FulfillmentService>,
    ) -> Self {
        self.fulfillment.insert(platform, service);
        self
    }

    /// Register only a logistics service.
    #[must_use]
    pub fn register_logistics(
        mut self,
        platform: Platform,
        service: Arc<dyn LogisticsService>,
    ) -> Self {
        self.logistics.insert(platform, service);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> PlatformRegistry {
        PlatformRegistry {
            authorization: self.authorization,
            orders: self.orders,
            fulfillment: self.fulfillment,
            logistics: self.logistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_reports_unsupported_platform() {
        let registry = PlatformRegistry::builder().build();
        let err = registry.orders(Platform::TikTokShop).err().unwrap();
        assert!(matches!(
            err,
            IntegrationError::UnsupportedPlatform {
                platform: Platform::TikTokShop,
                service: "order",
            }
        ));
    }

    #[test]
    fn test_default_adapters_cover_both_platforms() {
        let registry = PlatformRegistry::with_default_adapters(
            TikTokConfig::new("key", "secret"),
            MercadoLibreConfig::new("id", "secret", "https://wms.example/cb"),
        )
        .expect("registry builds");

        for platform in [Platform::TikTokShop, Platform::MercadoLibre] {
            assert!(registry.authorization(platform).is_ok());
            assert!(registry.orders(platform).is_ok());
            assert!(registry.fulfillment(platform).is_ok());
            assert!(registry.logistics(platform).is_ok());
        }
    }
}
