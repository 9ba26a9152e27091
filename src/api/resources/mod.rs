//
//  stripe-kit
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Stripe Resources
//!
//! Typed route groups, one module per Stripe collection. Each module holds
//! the response objects, the request parameter schemas, and a thin
//! `*Routes` wrapper that gives every operation of a
//! [`RouteGroup`](crate::api::request::RouteGroup) a typed signature.
//!
//! - [`products`]: `v1/products`
//! - [`customers`]: `v1/customers`

use serde::{Deserialize, Serialize};

use super::common::HasId;

/// Product catalogue operations.
pub mod products;

/// Customer operations.
pub mod customers;

/// A field Stripe returns as an ID unless it was requested in `expand`.
///
/// ```rust
/// use stripe_kit::api::resources::Expandable;
/// use stripe_kit::api::resources::products::Price;
///
/// let id: Expandable<Price> = serde_json::from_str(r#""price_123""#).unwrap();
/// assert_eq!(id.id(), "price_123");
/// assert!(id.as_object().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T: HasId> Expandable<T> {
    pub fn id(&self) -> &str {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(object) => object.id(),
        }
    }
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(object),
        }
    }
}

/// `expand` only when at least one field was asked for.
pub(crate) fn non_empty(fields: &[String]) -> Option<&[String]> {
    (!fields.is_empty()).then_some(fields)
}
