//! TikTok Shop OAuth flow.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use orderhub_core::{Credential, Platform, UnifiedShopInfo};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use super::TikTokAdapter;
use super::types::{TikTokApiResponse, TikTokShopInfoData, TikTokTokenData};
use crate::error::IntegrationError;
use crate::services::AuthorizationService;

#[async_trait]
impl AuthorizationService for TikTokAdapter {
    fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.config.auth_page_url.clone();
        url.query_pairs_mut()
            .append_pair("app_key", &self.config.app_key)
            .append_pair("state", state);
        url
    }

    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> Result<Credential, IntegrationError> {
        let data = self
            .token_request("/api/v2/token/get", &[("auth_code", code), ("grant_type", "authorized_code")])
            .await
            .map_err(auth_exchange_failure)?;
        Ok(map_credential(data, None))
    }

    #[instrument(skip(self, credential))]
    async fn refresh(&self, credential: &Credential) -> Result<Credential, IntegrationError> {
        let refresh_token = credential
            .refresh_token_str()
            .filter(|t| !t.is_empty())
            .ok_or(IntegrationError::RefreshUnavailable)?
            .to_string();

        let data = self
            .token_request(
                "/api/v2/token/refresh",
                &[("refresh_token", refresh_token.as_str()), ("grant_type", "refresh_token")],
            )
            .await?;

        // TikTok normally rotates the refresh token; fall back to the prior
        // one if a response ever omits it.
        let mut refreshed = map_credential(data, Some(refresh_token));
        refreshed.shop_id = credential.shop_id.clone();
        refreshed.shop_cipher = credential.shop_cipher.clone();
        Ok(refreshed)
    }

    #[instrument(skip(self, credential))]
    async fn shop_info(
        &self,
        credential: &Credential,
    ) -> Result<Option<UnifiedShopInfo>, IntegrationError> {
        // The shops endpoint is the one signed call made before a cipher
        // exists, so the cipher requirement is waived here.
        let request = self.signed_get("/authorization/202309/shops", credential, &[], false)?;
        let response: TikTokApiResponse<TikTokShopInfoData> =
            self.http.execute_json(request).await?;
        let Some(data) = response.into_data()? else {
            return Ok(None);
        };

        // The endpoint returns a collection, but one account maps to one
        // shop in practice; only the first entry is surfaced.
        Ok(data.shops.into_iter().next().map(|shop| UnifiedShopInfo {
            platform: Platform::TikTokShop,
            user_nickname: None,
            shop_id: shop.id,
            shop_name: shop.name,
            country_id: shop.region,
            cipher: shop.cipher,
            shop_code: shop.code,
            seller_type: shop.seller_type,
        }))
    }
}

impl TikTokAdapter {
    /// Call a token endpoint on the auth host. These requests are not signed;
    /// they authenticate with the app key/secret pair directly.
    async fn token_request(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<TikTokTokenData, IntegrationError> {
        let mut url = Url::parse(&format!("{}{}", self.config.auth_api_base_url, path))?;
        url.query_pairs_mut()
            .append_pair("app_key", &self.config.app_key)
            .append_pair("app_secret", self.config.app_secret.expose_secret())
            .extend_pairs(params.iter());

        let response: TikTokApiResponse<TikTokTokenData> =
            self.http.execute_json(self.http.client().get(url)).await?;
        response
            .into_data()?
            .ok_or_else(|| IntegrationError::AuthExchange("token response had no data".to_string()))
    }
}

/// Fold platform-level rejections of the code exchange into the auth
/// taxonomy; I/O and decoding failures keep their own variants.
fn auth_exchange_failure(err: IntegrationError) -> IntegrationError {
    match err {
        IntegrationError::Api { .. } | IntegrationError::Transport { .. } => {
            IntegrationError::AuthExchange(err.to_string())
        }
        other => other,
    }
}

fn map_credential(data: TikTokTokenData, prior_refresh_token: Option<String>) -> Credential {
    let refresh_token = data
        .refresh_token
        .filter(|t| !t.is_empty())
        .or(prior_refresh_token);

    Credential {
        platform: Platform::TikTokShop,
        access_token: SecretString::from(data.access_token),
        refresh_token: refresh_token.map(SecretString::from),
        access_token_expires_at: data.access_token_expire_in.and_then(epoch_seconds),
        refresh_token_expires_at: data.refresh_token_expire_in.and_then(epoch_seconds),
        shop_id: None,
        shop_cipher: None,
        seller_id: data.open_id,
    }
}

/// TikTok reports expiries as absolute epoch seconds.
fn epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
