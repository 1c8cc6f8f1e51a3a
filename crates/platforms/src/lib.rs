//! Orderhub platform adapters.
//!
//! One vendor-neutral contract - authorization, orders, fulfillment,
//! logistics - backed by one adapter per marketplace. Callers pick a
//! [`Platform`](orderhub_core::Platform) and a [`PlatformRegistry`] hands back
//! the right implementation; platform payloads, auth schemes, and pagination
//! styles never leak past this crate.
//!
//! # Architecture
//!
//! - Capability traits ([`services`]) split the contract by responsibility,
//!   one concrete strategy per platform.
//! - Adapters are stateless: read-only config plus pooled HTTP clients. Every
//!   unified value is built fresh from a live API response, so concurrent
//!   callers never share mutable state.
//! - The WMS owns credential persistence; a token refresh returns a new
//!   [`Credential`](orderhub_core::Credential) for it to store.
//!
//! # Adapters
//!
//! - [`tiktok`] - TikTok Shop: HMAC-SHA256 signed requests, opaque page
//!   tokens, platform-issued shipping labels.
//! - [`mercadolibre`] - Mercado Libre: bearer auth, offset pagination, and
//!   multi-order pack consolidation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod mercadolibre;
pub mod registry;
pub mod services;
pub mod tiktok;

mod http;

pub use config::{ConfigError, MercadoLibreConfig, TikTokConfig};
pub use error::IntegrationError;
pub use mercadolibre::MercadoLibreAdapter;
pub use registry::{PlatformRegistry, PlatformRegistryBuilder};
pub use services::{AuthorizationService, FulfillmentService, LogisticsService, OrderService};
pub use tiktok::TikTokAdapter;
