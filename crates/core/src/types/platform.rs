//! Marketplace platform identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A marketplace platform with a registered adapter.
///
/// Used by the WMS as the selector when asking the registry for a service
/// implementation, and stamped onto every [`super::Credential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    /// TikTok Shop open platform.
    TikTokShop,
    /// Mercado Libre marketplace.
    MercadoLibre,
}

impl Platform {
    /// Stable string key for this platform (matches the serde representation).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TikTokShop => "TIKTOK_SHOP",
            Self::MercadoLibre => "MERCADO_LIBRE",
        }
    }

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::TikTokShop => "TikTok Shop",
            Self::MercadoLibre => "Mercado Libre",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a platform key does not match any known platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown platform: {0}")]
pub struct PlatformParseError(pub String);

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TIKTOK_SHOP" => Ok(Self::TikTokShop),
            "MERCADO_LIBRE" => Ok(Self::MercadoLibre),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}
