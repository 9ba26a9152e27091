//
//  stripe-kit
//  api/handler.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The transport seam every route group sends through.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::common::ApiError;

/// Performs one Stripe request and decodes the JSON response.
///
/// Route methods never touch HTTP directly: they encode their parameters
/// and hand an already-encoded query string or form body to a handler.
/// [`StripeClient`](super::client::StripeClient) is the production
/// implementation; tests substitute a recording handler.
///
/// Implementations own authentication, timeouts and status mapping, and
/// must be safe to share across tasks.
#[async_trait]
pub trait ApiHandler: Send + Sync {
    /// Sends `method path[?query]` with an optional form `body`.
    ///
    /// `path` is relative to the API base, e.g. `v1/products/prod_123`.
    /// `headers` are per-request extras layered over the handler's own.
    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        query: Option<String>,
        body: Option<String>,
        headers: &HeaderMap,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static;
}
