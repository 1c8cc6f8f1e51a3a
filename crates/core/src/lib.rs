//! Orderhub Core - Shared types library.
//!
//! This crate provides the vendor-neutral data model shared by every part of
//! Orderhub:
//! - `platforms` - Marketplace adapters (TikTok Shop, Mercado Libre, ...)
//! - downstream WMS/OMS consumers of the unified contract
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Every value
//! here is request-scoped: adapters build them fresh from live API responses
//! on each call, and nothing is cached or persisted by this layer. The WMS is
//! responsible for storing credentials between calls.
//!
//! # Modules
//!
//! - [`types`] - Unified orders, shipments, credentials, fulfillment actions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
