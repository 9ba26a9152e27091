//
//  stripe-kit
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic Request Builder
//!
//! Every Stripe route is the same three steps: pick a verb and a path,
//! encode the parameters, hand both to an [`ApiHandler`]. This module does
//! those steps once so resource modules only supply a schema and typed
//! signatures.
//!
//! - [`ApiRequest`]: verb + path + parameters, not yet encoded
//! - [`EncodedRequest`]: the same request with parameters placed in the
//!   query string (`GET`, `DELETE`) or the form body (`POST`)
//! - [`RouteGroup`]: the CRUD + search operations of one collection
//!
//! ## Example
//!
//! ```rust
//! use stripe_kit::api::params::Params;
//! use stripe_kit::api::request::ApiRequest;
//!
//! let encoded = ApiRequest::get("v1/products/prod_123")
//!     .params(Params::new().with("expand", vec!["default_price"]))
//!     .encode()
//!     .unwrap();
//!
//! assert_eq!(encoded.query.as_deref(), Some("expand[0]=default_price"));
//! assert!(encoded.body.is_none());
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::common::{ApiError, DeletedObject, EncodeError};
use super::handler::ApiHandler;
use super::params::{encode, Params, ToParams};

/// Characters escaped when an ID is embedded as a path segment.
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Joins a collection path and an object ID, escaping the ID.
///
/// ```rust
/// use stripe_kit::api::request::item_path;
///
/// assert_eq!(item_path("v1/products", "prod_123"), "v1/products/prod_123");
/// assert_eq!(item_path("v1/products", "a/b"), "v1/products/a%2Fb");
/// ```
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, utf8_percent_encode(id, PATH_SEGMENT_SET))
}

/// A request that has not been encoded yet.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    params: Params,
}

/// A request ready for an [`ApiHandler`].
///
/// At most one of `query` and `body` is set, and neither is ever
/// `Some("")`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replaces the request parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encodes the parameters and places them by verb.
    ///
    /// `GET` and `DELETE` carry them in the query string, every other verb
    /// in the form body.
    pub fn encode(self) -> Result<EncodedRequest, EncodeError> {
        let encoded = encode(&self.params)?;
        let encoded = (!encoded.is_empty()).then_some(encoded);

        let (query, body) = if self.method == Method::GET || self.method == Method::DELETE {
            (encoded, None)
        } else {
            (None, encoded)
        };

        Ok(EncodedRequest {
            method: self.method,
            path: self.path,
            query,
            body,
        })
    }
}

/// Encodes `request` and sends it through `handler`.
///
/// Encoding failures return before the handler is called, so a request is
/// either sent whole or not at all.
pub async fn dispatch<H, T>(
    handler: &H,
    headers: &HeaderMap,
    request: ApiRequest,
) -> Result<T, ApiError>
where
    H: ApiHandler,
    T: DeserializeOwned + Send + 'static,
{
    let EncodedRequest {
        method,
        path,
        query,
        body,
    } = request.encode()?;

    tracing::debug!(%method, %path, has_query = query.is_some(), has_body = body.is_some(), "dispatching request");

    handler.send(method, &path, query, body, headers).await
}

/// The standard operations of one Stripe collection.
///
/// Resource modules wrap a `RouteGroup` and give each operation a typed
/// signature. `collection` is the API path of the collection, e.g.
/// `v1/products`; search lives at `{collection}/search`.
pub struct RouteGroup<'a, H> {
    handler: &'a H,
    collection: &'static str,
    headers: HeaderMap,
}

impl<'a, H: ApiHandler> RouteGroup<'a, H> {
    pub fn new(handler: &'a H, collection: &'static str) -> Self {
        Self {
            handler,
            collection,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header sent with every request of this group, e.g.
    /// `Idempotency-Key` or `Stripe-Account`.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub fn item_path(&self, id: &str) -> String {
        item_path(self.collection, id)
    }

    /// Sends an arbitrary request with this group's headers.
    pub async fn send<T>(&self, request: ApiRequest) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        dispatch(self.handler, &self.headers, request).await
    }

    /// `POST {collection}`
    pub async fn create<T, P>(&self, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
        P: ToParams + ?Sized,
    {
        self.send(ApiRequest::post(self.collection).params(params.to_params()))
            .await
    }

    /// `GET {collection}/{id}`
    pub async fn retrieve<T, P>(&self, id: &str, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
        P: ToParams + ?Sized,
    {
        self.send(ApiRequest::get(self.item_path(id)).params(params.to_params()))
            .await
    }

    /// `POST {collection}/{id}`
    pub async fn update<T, P>(&self, id: &str, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
        P: ToParams + ?Sized,
    {
        self.send(ApiRequest::post(self.item_path(id)).params(params.to_params()))
            .await
    }

    /// `GET {collection}`
    pub async fn list<T, P>(&self, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
        P: ToParams + ?Sized,
    {
        self.send(ApiRequest::get(self.collection).params(params.to_params()))
            .await
    }

    /// `DELETE {collection}/{id}`
    pub async fn delete(&self, id: &str) -> Result<DeletedObject, ApiError> {
        self.send(ApiRequest::delete(self.item_path(id))).await
    }

    /// `GET {collection}/search`
    pub async fn search<T, P>(&self, params: &P) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
        P: ToParams + ?Sized,
    {
        let path = format!("{}/search", self.collection);
        self.send(ApiRequest::get(path).params(params.to_params()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_places_params_in_query() {
        let encoded = ApiRequest::get("v1/products")
            .params(Params::new().with("limit", 3i64).with("active", true))
            .encode()
            .unwrap();

        assert_eq!(encoded.method, Method::GET);
        assert_eq!(encoded.query.as_deref(), Some("active=true&limit=3"));
        assert_eq!(encoded.body, None);
    }

    #[test]
    fn test_post_places_params_in_body() {
        let encoded = ApiRequest::post("v1/products")
            .params(Params::new().with("name", "Mug"))
            .encode()
            .unwrap();

        assert_eq!(encoded.query, None);
        assert_eq!(encoded.body.as_deref(), Some("name=Mug"));
    }

    #[test]
    fn test_empty_params_send_nothing() {
        let encoded = ApiRequest::delete("v1/products/prod_1").encode().unwrap();
        assert_eq!(encoded.query, None);
        assert_eq!(encoded.body, None);

        let encoded = ApiRequest::post("v1/products/prod_1").encode().unwrap();
        assert_eq!(encoded.body, None);
    }

    #[test]
    fn test_encode_failure_surfaces() {
        let result = ApiRequest::post("v1/products")
            .params(Params::new().with("weight", f64::INFINITY))
            .encode();
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedValueKind { .. })
        ));
    }

    #[test]
    fn test_item_path_escapes_id() {
        assert_eq!(item_path("v1/customers", "cus 1?x"), "v1/customers/cus%201%3Fx");
    }
}
