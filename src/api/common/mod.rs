//
//  stripe-kit
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types used by every Stripe route group: the error taxonomy,
//! Stripe's error envelope, and the objects returned by list, search and
//! delete operations.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`StripeErrorDetail`] - The `error` object Stripe returns on failure
//! - [`DeletedObject`] - Returned by every `delete` route
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use stripe_kit::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthRequired) => println!("Set STRIPE_API_KEY first"),
//!         Err(ApiError::NotFound(detail)) => println!("Not found: {}", detail),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

pub use crate::api::params::EncodeError;

/// Unified error type for all Stripe API operations.
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `Encode` | Parameters could not be encoded; nothing was sent | N/A |
/// | `AuthRequired` | No secret key configured | N/A |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `AuthFailed` | Invalid API key | 401 |
/// | `RequestFailed` | Valid parameters but the request failed (e.g. card declined) | 402 |
/// | `Forbidden` | Key lacks permission | 403 |
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `Conflict` | Conflicting concurrent request | 409 |
/// | `RateLimited` | Too many requests | 429 |
/// | `ServerError` | Stripe-side failure | 5xx |
/// | `Network` | Connection, TLS or timeout failure | N/A |
/// | `Decode` | Response body did not match the expected type | N/A |
/// | `Unknown` | Any other non-success status | other |
///
/// Everything except `Encode` is a transport error (see
/// [`ApiError::is_transport`]); those are returned to the caller as they
/// are, never retried.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request parameters could not be encoded.
    ///
    /// Raised before any network I/O, so no partial request was sent.
    #[error("Invalid parameters: {0}")]
    Encode(#[from] EncodeError),

    /// No secret key was configured for the client.
    #[error("Authentication required")]
    AuthRequired,

    /// The request was malformed or contained invalid parameters (400).
    #[error("Bad request: {0}")]
    BadRequest(StripeErrorDetail),

    /// The API key was invalid or revoked (401).
    #[error("Authentication failed: {0}")]
    AuthFailed(StripeErrorDetail),

    /// The parameters were valid but the request failed (402).
    #[error("Request failed: {0}")]
    RequestFailed(StripeErrorDetail),

    /// The API key does not have permission for this request (403).
    #[error("Permission denied: {0}")]
    Forbidden(StripeErrorDetail),

    /// The requested resource does not exist (404).
    #[error("Resource not found: {0}")]
    NotFound(StripeErrorDetail),

    /// The request conflicts with another request (409).
    #[error("Conflict: {0}")]
    Conflict(StripeErrorDetail),

    /// Too many requests hit the API too quickly (429).
    #[error("Rate limit exceeded: {0}")]
    RateLimited(StripeErrorDetail),

    /// Something went wrong on Stripe's end (5xx).
    #[error("Server error: {0}")]
    ServerError(StripeErrorDetail),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected type.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other non-success status.
    #[error("Unexpected status {status}: {detail}")]
    Unknown {
        /// The HTTP status code.
        status: u16,
        /// Whatever detail could be recovered from the body.
        detail: StripeErrorDetail,
    },
}

impl ApiError {
    /// Builds the error matching an HTTP status code.
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status of a non-success response
    /// * `detail` - The parsed `error` object, or a message-only detail
    ///   when the body was not Stripe's envelope
    ///
    /// # Returns
    ///
    /// The variant from the table on [`ApiError`]; any 5xx is
    /// `ServerError` and any other unlisted status is `Unknown`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stripe_kit::api::common::{ApiError, StripeErrorDetail};
    ///
    /// let err = ApiError::from_status(402, StripeErrorDetail::message("Your card was declined."));
    /// assert!(matches!(err, ApiError::RequestFailed(_)));
    ///
    /// let err = ApiError::from_status(418, StripeErrorDetail::default());
    /// assert!(matches!(err, ApiError::Unknown { status: 418, .. }));
    /// ```
    pub fn from_status(status: u16, detail: StripeErrorDetail) -> Self {
        match status {
            400 => ApiError::BadRequest(detail),
            401 => ApiError::AuthFailed(detail),
            402 => ApiError::RequestFailed(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::Conflict(detail),
            429 => ApiError::RateLimited(detail),
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::Unknown { status, detail },
        }
    }

    /// Returns `true` for failures surfaced by the transport: everything
    /// except a parameter encoding failure.
    ///
    /// # Notes
    ///
    /// A `false` result guarantees nothing reached the network, so the
    /// request can be corrected and sent again safely.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Encode(_))
    }

    /// Returns Stripe's error detail, when the failure carried one.
    ///
    /// # Returns
    ///
    /// `Some` for every status-mapped variant, `None` for `Encode`,
    /// `AuthRequired`, `Network` and `Decode`.
    pub fn detail(&self) -> Option<&StripeErrorDetail> {
        match self {
            ApiError::BadRequest(d)
            | ApiError::AuthFailed(d)
            | ApiError::RequestFailed(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Conflict(d)
            | ApiError::RateLimited(d)
            | ApiError::ServerError(d) => Some(d),
            ApiError::Unknown { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Stripe's error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    /// The error object itself.
    pub error: StripeErrorDetail,
}

/// The `error` object of a failed Stripe response.
///
/// ```rust
/// use stripe_kit::api::common::StripeErrorBody;
///
/// let json = r#"{"error": {
///     "type": "invalid_request_error",
///     "code": "resource_missing",
///     "param": "id",
///     "message": "No such product: 'prod_missing'"
/// }}"#;
///
/// let body: StripeErrorBody = serde_json::from_str(json).unwrap();
/// assert_eq!(body.error.code.as_deref(), Some("resource_missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripeErrorDetail {
    /// Error category, e.g. `invalid_request_error` or `card_error`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Short machine-readable code, e.g. `resource_missing`.
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,

    /// The parameter the error relates to.
    #[serde(default)]
    pub param: Option<String>,

    /// Issuer decline reason for card errors.
    #[serde(default)]
    pub decline_code: Option<String>,

    /// Link to Stripe's documentation for the error code.
    #[serde(default)]
    pub doc_url: Option<String>,
}

impl StripeErrorDetail {
    /// A detail holding only a message, used when the body was not JSON.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

impl fmt::Display for StripeErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().unwrap_or("no message");
        match (&self.code, &self.param) {
            (Some(code), Some(param)) => write!(f, "{message} ({code}, param: {param})"),
            (Some(code), None) => write!(f, "{message} ({code})"),
            (None, Some(param)) => write!(f, "{message} (param: {param})"),
            (None, None) => f.write_str(message),
        }
    }
}

/// Returned by every `delete` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedObject {
    /// ID of the deleted object.
    pub id: String,

    /// Object type, e.g. `product`.
    pub object: String,

    /// Always `true` on success.
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let detail = StripeErrorDetail::message("boom");
        assert!(matches!(ApiError::from_status(400, detail.clone()), ApiError::BadRequest(_)));
        assert!(matches!(ApiError::from_status(401, detail.clone()), ApiError::AuthFailed(_)));
        assert!(matches!(ApiError::from_status(402, detail.clone()), ApiError::RequestFailed(_)));
        assert!(matches!(ApiError::from_status(404, detail.clone()), ApiError::NotFound(_)));
        assert!(matches!(ApiError::from_status(429, detail.clone()), ApiError::RateLimited(_)));
        assert!(matches!(ApiError::from_status(503, detail.clone()), ApiError::ServerError(_)));
        assert!(matches!(
            ApiError::from_status(418, detail),
            ApiError::Unknown { status: 418, .. }
        ));
    }

    #[test]
    fn test_encode_error_is_not_transport() {
        let err = ApiError::from(EncodeError::EmptyKey {
            path: "metadata".to_string(),
        });
        assert!(!err.is_transport());
        assert!(ApiError::AuthRequired.is_transport());
    }

    #[test]
    fn test_error_display() {
        let detail = StripeErrorDetail {
            code: Some("resource_missing".to_string()),
            param: Some("id".to_string()),
            message: Some("No such product: 'prod_x'".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ApiError::NotFound(detail).to_string(),
            "Resource not found: No such product: 'prod_x' (resource_missing, param: id)"
        );
    }

    #[test]
    fn test_deleted_object_deserializes() {
        let json = r#"{"id": "prod_1", "object": "product", "deleted": true}"#;
        let deleted: DeletedObject = serde_json::from_str(json).unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.object, "product");
    }
}
