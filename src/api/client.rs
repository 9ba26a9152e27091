//
//  stripe-kit
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Stripe API
//!
//! [`StripeClient`] is the production [`ApiHandler`]: it turns an encoded
//! request into an HTTPS call against `api.stripe.com` and decodes the JSON
//! reply.
//!
//! ## Features
//!
//! - Bearer authentication with a secret or restricted key
//! - Optional `Stripe-Version` pinning and `Stripe-Account` targeting
//! - Form bodies sent as `application/x-www-form-urlencoded`
//! - Status-mapped errors built from Stripe's error envelope
//! - Custom User-Agent header

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::common::{ApiError, StripeErrorBody, StripeErrorDetail};
use super::handler::ApiHandler;
use super::resources::customers::CustomerRoutes;
use super::resources::products::ProductRoutes;
use crate::auth::AuthCredential;
use crate::config::{Config, DEFAULT_API_BASE};

/// Parses a Stripe error response into a status-mapped [`ApiError`].
///
/// Stripe returns errors in the format:
/// ```json
/// {"error": {"type": "invalid_request_error", "message": "Human readable message"}}
/// ```
///
/// If the body is not that envelope, the raw body (or the status reason
/// when the body is empty) becomes the message.
pub fn format_api_error(status: StatusCode, body: &str) -> ApiError {
    let detail = match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => {
            StripeErrorDetail::message(status.canonical_reason().unwrap_or("no response body"))
        }
        Err(_) => StripeErrorDetail::message(body.trim()),
    };

    ApiError::from_status(status.as_u16(), detail)
}

/// The main HTTP client for the Stripe API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use stripe_kit::api::StripeClient;
/// use stripe_kit::auth::AuthCredential;
///
/// let client = StripeClient::new()?
///     .with_auth(AuthCredential::from_key("sk_test_4eC39HqLyjWDarjtT1zdp7dc")?);
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Route Groups
///
/// ```rust,no_run
/// use stripe_kit::api::StripeClient;
/// use stripe_kit::api::resources::products::CreateProductParams;
///
/// # async fn example(client: StripeClient) -> anyhow::Result<()> {
/// let product = client
///     .products()
///     .create(&CreateProductParams::new("Gold plan"))
///     .await?;
/// println!("Created {}", product.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StripeClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL without a trailing slash
    api_base: String,
    auth: Option<AuthCredential>,
    api_version: Option<String>,
    stripe_account: Option<String>,
}

impl StripeClient {
    /// Creates a client for `https://api.stripe.com` with Stripe's default
    /// timeout and no credentials.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Creates a client for a different API host, e.g. a local mock.
    pub fn with_base_url(api_base: &str) -> Result<Self, ApiError> {
        Self::build(api_base, Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client from loaded configuration, including credentials
    /// when a key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut client = Self::build(&config.api_base, Duration::from_secs(config.timeout_secs))?;

        client.auth = config.credential()?;
        client.api_version = config.api_version.clone();
        client.stripe_account = config.stripe_account.clone();

        Ok(client)
    }

    fn build(api_base: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("stripe-kit/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            auth: None,
            api_version: None,
            stripe_account: None,
        })
    }

    /// Sets the credential used for every request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Pins the `Stripe-Version` header.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sends every request on behalf of a connected account.
    pub fn with_stripe_account(mut self, account: impl Into<String>) -> Self {
        self.stripe_account = Some(account.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.api_base
    }

    /// Builds the full URL for a relative API path.
    ///
    /// ```rust
    /// use stripe_kit::api::StripeClient;
    ///
    /// let client = StripeClient::new()?;
    /// assert_eq!(
    ///     client.url("v1/products", Some("limit=3")),
    ///     "https://api.stripe.com/v1/products?limit=3"
    /// );
    /// # Ok::<(), stripe_kit::api::ApiError>(())
    /// ```
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(query) if !query.is_empty() => format!("{}/{}?{}", self.api_base, path, query),
            _ => format!("{}/{}", self.api_base, path),
        }
    }

    /// Product routes.
    pub fn products(&self) -> ProductRoutes<'_, Self> {
        ProductRoutes::new(self)
    }

    /// Customer routes.
    pub fn customers(&self) -> CustomerRoutes<'_, Self> {
        CustomerRoutes::new(self)
    }
}

#[async_trait]
impl ApiHandler for StripeClient {
    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Option<String>,
        headers: &HeaderMap,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let auth = self.auth.as_ref().ok_or(ApiError::AuthRequired)?;

        let url = self.url(path, query.as_deref());
        let mut request = auth.apply_to_request(self.http.request(method.clone(), &url));

        if let Some(version) = &self.api_version {
            request = request.header("Stripe-Version", version);
        }
        if let Some(account) = &self.stripe_account {
            request = request.header("Stripe-Account", account);
        }
        request = request.headers(headers.clone());

        if let Some(body) = body {
            request = request
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let request_id = response
            .headers()
            .get("request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                request_id = request_id.as_deref().unwrap_or("-"),
                "Stripe request failed"
            );
            return Err(format_api_error(status, &text));
        }

        tracing::debug!(%method, path, status = status.as_u16(), "Stripe request succeeded");

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_api_error_envelope() {
        let body = r#"{"error": {"type": "invalid_request_error", "code": "resource_missing", "message": "No such product: 'prod_x'", "param": "id"}}"#;
        let err = format_api_error(StatusCode::NOT_FOUND, body);
        match err {
            ApiError::NotFound(detail) => {
                assert_eq!(detail.kind.as_deref(), Some("invalid_request_error"));
                assert_eq!(detail.param.as_deref(), Some("id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_format_api_error_raw_body() {
        let err = format_api_error(StatusCode::BAD_GATEWAY, "upstream timeout");
        assert!(matches!(&err, ApiError::ServerError(d) if d.message.as_deref() == Some("upstream timeout")));

        let err = format_api_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(&err, ApiError::RateLimited(d) if d.message.as_deref() == Some("Too Many Requests")));
    }

    #[test]
    fn test_url_building() {
        let client = StripeClient::with_base_url("http://localhost:12111/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:12111");
        assert_eq!(client.url("/v1/customers", None), "http://localhost:12111/v1/customers");
        assert_eq!(client.url("v1/customers", Some("")), "http://localhost:12111/v1/customers");
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            api_key: Some("sk_test_abcdef123456".to_string()),
            api_version: Some("2024-06-20".to_string()),
            ..Config::default()
        };
        let client = StripeClient::from_config(&config).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.base_url(), DEFAULT_API_BASE);
    }
}
