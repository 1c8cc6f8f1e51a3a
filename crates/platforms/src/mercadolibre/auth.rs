//! Mercado Libre OAuth flow.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use orderhub_core::{Credential, Platform, UnifiedShopInfo};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use super::MercadoLibreAdapter;
use super::types::{MercadoLibreTokenData, MercadoLibreUserInfo};
use crate::error::IntegrationError;
use crate::services::AuthorizationService;

#[async_trait]
impl AuthorizationService for MercadoLibreAdapter {
    fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.config.auth_page_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.config.app_id)
                .append_pair("redirect_uri", &self.config.redirect_uri);
            if !state.is_empty() {
                pairs.append_pair("state", state);
            }
        }
        url
    }

    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> Result<Credential, IntegrationError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.app_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        let data = self
            .token_request(&form)
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

        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.app_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let data = self.token_request(&form).await?;

        // The platform may or may not rotate the refresh token; when the
        // response omits one the prior token stays valid and is carried
        // forward on the new credential.
        Ok(map_credential(data, Some(refresh_token)))
    }

    #[instrument(skip(self, credential))]
    async fn shop_info(
        &self,
        credential: &Credential,
    ) -> Result<Option<UnifiedShopInfo>, IntegrationError> {
        let request = self.bearer_get(credential, "/users/me", &[])?;
        let user: MercadoLibreUserInfo = self.http.execute_json(request).await?;
        Ok(Some(UnifiedShopInfo {
            platform: Platform::MercadoLibre,
            user_nickname: user.nickname,
            shop_id: credential.seller_id.clone(),
            shop_name: user.company.and_then(|c| c.corporate_name),
            country_id: user.country_id,
            cipher: None,
            shop_code: None,
            seller_type: None,
        }))
    }
}

impl MercadoLibreAdapter {
    async fn token_request(
        &self,
        form: &[(&str, &str)],
    ) -> Result<MercadoLibreTokenData, IntegrationError> {
        let request = self
            .http
            .client()
            .post(self.request_url("/oauth/token")?)
            .header("Accept", "application/json")
            .form(form);
        self.http.execute_json(request).await
    }
}

/// Fold platform-level rejections of the code exchange into the auth
/// taxonomy; I/O and decoding failures keep their own variants.
fn auth_exchange_failure(err: IntegrationError) -> IntegrationError {
    match err {
        IntegrationError::Transport { .. } | IntegrationError::NotFound(_) => {
            IntegrationError::AuthExchange(err.to_string())
        }
        other => other,
    }
}

fn map_credential(data: MercadoLibreTokenData, prior_refresh_token: Option<String>) -> Credential {
    let refresh_token = data
        .refresh_token
        .filter(|t| !t.is_empty())
        .or(prior_refresh_token);
    let seller_id = data.user_id.map(|id| id.to_string());

    Credential {
        platform: Platform::MercadoLibre,
        access_token: SecretString::from(data.access_token),
        refresh_token: refresh_token.map(SecretString::from),
        // Lifetime in seconds, anchored to now.
        access_token_expires_at: data
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
        // Refresh tokens live for months; no expiry is tracked.
        refresh_token_expires_at: None,
        // The platform has no shop concept separate from the seller account.
        shop_id: seller_id.clone(),
        shop_cipher: None,
        seller_id,
    }
}
