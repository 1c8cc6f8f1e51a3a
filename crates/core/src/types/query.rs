//! Order queries and paginated results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter and paging parameters for an order listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderQuery {
    /// Orders created at or after this instant.
    pub created_from: Option<DateTime<Utc>>,
    /// Orders created before this instant.
    pub created_to: Option<DateTime<Utc>>,
    /// Platform-specific status filter, passed through verbatim.
    pub order_status: Option<String>,
    /// Records per page. Platforms bound this differently; an out-of-range
    /// size is a typed error, not a silent clamp.
    pub page_size: u32,
    /// Opaque cursor from a previous page's `next_page_token`. `None` means
    /// the first page. Never inspected by callers - shape is per-platform.
    pub page_token: Option<String>,
    /// Drop orders already stocked in the platform's own fulfillment
    /// warehouse (Mercado Libre full), which the WMS never ships itself.
    pub filter_full_stock: bool,
}

/// One page of results plus the cursor for the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Cursor for the next page; `None` means no further pages.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// A page with no items and no continuation.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
