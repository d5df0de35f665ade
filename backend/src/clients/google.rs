//! Google ID token verification client
//!
//! Verifies OAuth ID tokens against the tokeninfo endpoint and checks
//! the audience matches our client id. Verification failures are never
//! locally recovered; the login aborts.

use super::{GoogleIdentity, GoogleTokenVerifier};
use crate::config::GoogleConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

/// Tokeninfo-backed Google verifier
pub struct GoogleVerifier {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleVerifier {
    pub fn new(http: reqwest::Client, config: GoogleConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl GoogleTokenVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity> {
        let url = format!("{}/tokeninfo", self.config.tokeninfo_url);

        let response = self
            .http
            .get(&url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .context("Google tokeninfo request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Google rejected the token (status {})", response.status());
        }

        let info: TokenInfo = response
            .json()
            .await
            .context("Google tokeninfo response is not valid JSON")?;

        if info.aud != self.config.client_id {
            anyhow::bail!("Google token audience mismatch");
        }

        Ok(GoogleIdentity {
            name: info.name.unwrap_or_else(|| info.email.clone()),
            subject: info.sub,
            email: info.email,
        })
    }
}
