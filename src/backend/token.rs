use crate::config::Config;
use crate::error::{auth_error, CalResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::info;

/// Google OAuth token endpoint
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// File-backed OAuth token cache with automatic refresh.
///
/// The token file holds `access_token`, `refresh_token` and a computed
/// `expires_at` unix timestamp. The initial token comes from a one-time
/// OAuth consent flow outside this crate.
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    client: Client,
    token_url: String,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self {
            config,
            client: Client::new(),
            token_url: TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Point the manager at a different token endpoint (used by tests)
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Get a valid access token, refreshing the stored one if it expired
    pub async fn access_token(&self) -> CalResult<String> {
        let token_file = {
            let config_read = self.config.read().await;
            config_read.token_file.clone()
        };

        let stored = fs::read_to_string(&token_file).await.map_err(|_| {
            auth_error(&format!(
                "No stored token at {}. Complete the OAuth consent flow first.",
                token_file
            ))
        })?;
        let token: Value = serde_json::from_str(&stored)
            .map_err(|e| auth_error(&format!("Failed to parse token JSON: {}", e)))?;

        // Check if the stored token is still valid
        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            if expiry > Utc::now().timestamp() {
                if let Some(access_token) = token.get("access_token").and_then(|v| v.as_str()) {
                    return Ok(access_token.to_string());
                }
            }
        }

        // Token is expired or incomplete, refresh it
        self.refresh_token(&token, &token_file).await
    }

    /// Refresh an expired token and rewrite the token file
    async fn refresh_token(&self, token: &Value, token_file: &str) -> CalResult<String> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| auth_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| auth_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(auth_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| auth_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| auth_error("Token response missing 'access_token' field"))?;

        // Keep the refresh token, recompute the expiry
        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        let stored = json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "expires_at": Utc::now().timestamp() + expires_in,
        });
        fs::write(token_file, stored.to_string()).await?;

        info!("Refreshed Google Calendar access token");
        Ok(access_token.to_string())
    }
}
