//! Unified shop/seller account information.

use serde::{Deserialize, Serialize};

use super::Platform;

/// Seller account details as reported by the platform after authorization.
///
/// The WMS uses this once per connection to capture the shop id and, for
/// platforms that require it, the shop cipher onto the stored credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedShopInfo {
    /// Platform this shop lives on.
    pub platform: Platform,
    /// Account nickname, when the platform exposes one.
    pub user_nickname: Option<String>,
    /// Shop identifier.
    pub shop_id: Option<String>,
    /// Shop display name.
    pub shop_name: Option<String>,
    /// Country/site identifier.
    pub country_id: Option<String>,
    /// Opaque per-request shop secret (TikTok Shop's cipher), when issued.
    pub cipher: Option<String>,
    /// Shop code, when the platform exposes one.
    pub shop_code: Option<String>,
    /// Seller type (e.g. cross-border vs. local), when exposed.
    pub seller_type: Option<String>,
}
