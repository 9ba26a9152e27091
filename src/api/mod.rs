//
//  stripe-kit
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Stripe REST API.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`params`]: The parameter value model and the form encoder
//! - [`request`]: Generic request builder shared by every route group
//! - [`handler`]: The transport trait route groups send through
//! - [`client`]: The `reqwest`-backed transport
//! - [`resources`]: Typed route groups (products, customers)
//! - [`common`]: Shared types (errors, pagination, deleted objects)
//!
//! ## Usage
//!
//! ### Creating a Client
//!
//! ```rust,no_run
//! use stripe_kit::api::StripeClient;
//! use stripe_kit::auth::AuthCredential;
//!
//! let client = StripeClient::new()
//!     .expect("Failed to create client")
//!     .with_auth(AuthCredential::from_key("sk_test_4eC39HqLyjWDarjtT1zdp7dc").unwrap());
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants. Parameter encoding
//! failures (`Encode`) happen before anything is sent; every other variant
//! comes from the transport:
//!
//! - `AuthFailed`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimited`: 429 Too Many Requests
//! - `ServerError`: 5xx Server Errors

/// The `reqwest` implementation of [`handler::ApiHandler`].
///
/// Provides the [`StripeClient`] struct which handles:
/// - Bearer authentication
/// - `Stripe-Version` and `Stripe-Account` headers
/// - Error handling and status code mapping
pub mod client;

/// Types shared by every route group.
///
/// Includes:
/// - [`ApiError`]: Standardized error type
/// - [`common::List`] / [`common::SearchResult`]: Pagination wrappers
/// - [`common::DeletedObject`]: Delete confirmation
pub mod common;

/// The transport collaborator trait.
pub mod handler;

/// Parameter values and the `x-www-form-urlencoded` encoder.
pub mod params;

/// Verb + path + params, encoded and dispatched.
pub mod request;

/// Typed route groups for Stripe collections.
pub mod resources;

/// Re-export of the main Stripe API client.
pub use client::StripeClient;

/// Re-export of common API types.
pub use common::{ApiError, DeletedObject, List, SearchResult};

pub use handler::ApiHandler;
