//! Identity token verification
//!
//! The front-end signs users in with Google and posts the resulting ID token. The
//! verifier exchanges it for the user's profile; anything the endpoint rejects, or a
//! token minted for another client, is treated as invalid. The audience check is
//! never skipped: a blank client id matches no token.

use crate::{
    error::{AppError, AppResult},
    models::{places::ApiTokenInfo, UserIdentity},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Returns the identity behind `token`, or `Unauthorized` when it is not valid
    async fn verify(&self, token: &str) -> AppResult<UserIdentity>;
}

#[derive(Clone)]
pub struct GoogleIdentityVerifier {
    http_client: HttpClient,
    tokeninfo_url: String,
    client_id: String,
}

impl GoogleIdentityVerifier {
    pub fn new(tokeninfo_url: String, client_id: String, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            http_client: HttpClient::builder().timeout(timeout).build()?,
            tokeninfo_url,
            client_id,
        })
    }
}

#[async_trait::async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        let response = self
            .http_client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Identity token rejected");
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }

        let claims: ApiTokenInfo = response.json().await?;

        if self.client_id.is_empty() || claims.aud != self.client_id {
            tracing::warn!(audience = %claims.aud, "Identity token issued for another client");
            return Err(AppError::Unauthorized("Invalid token".to_string()));
        }

        Ok(UserIdentity {
            name: claims.name.unwrap_or_default(),
            email: claims.email.unwrap_or_default(),
            picture_url: claims.picture,
            subject_id: claims.sub,
        })
    }
}
