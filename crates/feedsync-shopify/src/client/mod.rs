//! HTTP client for the Shopify Admin API `products.json` endpoint.

mod fetch_all;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ShopifyError;
use crate::pagination::{PAGE_LIMIT, PRODUCT_FIELDS};
use crate::types::{ShopifyProduct, ShopifyProductsResponse};

/// Maximum number of pages to walk before giving up (100k products).
pub(super) const MAX_PAGES: usize = 400;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for one store's Admin API.
///
/// Each page is requested exactly once. Non-2xx responses are mapped to typed
/// [`ShopifyError`] variants and never retried.
pub struct ShopifyClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl ShopifyClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ShopifyError::InvalidBaseUrl`] if the configured API base is not a
    /// valid URL.
    pub fn new(config: &feedsync_core::AppConfig) -> Result<Self, ShopifyError> {
        Self::with_base_url(
            &config.shopify_access_token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a client against an explicit Admin API root (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ShopifyError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, otherwise `Url::join` would replace the
        // version segment instead of appending `products.json`.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShopifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of at most [`PAGE_LIMIT`] products with ids strictly
    /// greater than `since_id`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Unauthorized`]: HTTP 401.
    /// - [`ShopifyError::RateLimited`]: HTTP 429.
    /// - [`ShopifyError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ShopifyError::Http`]: network, TLS, or timeout failure.
    /// - [`ShopifyError::Deserialize`]: body is not the expected JSON shape.
    pub async fn fetch_products_page(
        &self,
        since_id: i64,
    ) -> Result<Vec<ShopifyProduct>, ShopifyError> {
        let url = self.products_url(since_id)?;

        let response = self
            .client
            .get(url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ShopifyError::Unauthorized {
                url: url.to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ShopifyProductsResponse>(&body).map_err(|e| {
            ShopifyError::Deserialize {
                context: format!("products page since_id={since_id}"),
                source: e,
            }
        })?;

        Ok(parsed.products)
    }

    /// Builds the `products.json` URL for the given cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidBaseUrl`] if `products.json` cannot be
    /// joined onto the base URL.
    fn products_url(&self, since_id: i64) -> Result<Url, ShopifyError> {
        let mut url =
            self.base_url
                .join("products.json")
                .map_err(|e| ShopifyError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;

        url.query_pairs_mut()
            .append_pair("limit", &PAGE_LIMIT.to_string())
            .append_pair("since_id", &since_id.to_string())
            .append_pair("fields", PRODUCT_FIELDS);

        Ok(url)
    }
}

/// Parses a `Retry-After` value. The Admin API sends fractional seconds
/// (`"2.0"`), so whole seconds are rounded up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_retry_after(raw: &str) -> Option<u64> {
    let secs = raw.trim().parse::<f64>().ok()?;
    if secs.is_finite() && secs >= 0.0 {
        Some(secs.ceil() as u64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
