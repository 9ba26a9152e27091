//
//  stripe-kit
//  api/resources/products.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Product API types and routes.
//!
//! Products describe the goods or services a business sells. Prices hang
//! off products; a product may carry a default price, created inline with
//! `default_price_data`.
//!
//! # Example
//!
//! ```rust,no_run
//! use stripe_kit::api::StripeClient;
//! use stripe_kit::api::resources::products::{
//!     CreateProductParams, PriceData, ProductListParams, Recurring, RecurringInterval,
//! };
//!
//! # async fn example(client: StripeClient) -> anyhow::Result<()> {
//! let params = CreateProductParams::new("Gold plan")
//!     .description("Monthly access to everything")
//!     .metadata("tier", "gold")
//!     .default_price_data(
//!         PriceData::new("usd")
//!             .unit_amount(2000)
//!             .recurring(Recurring::new(RecurringInterval::Month)),
//!     );
//! let product = client.products().create(&params).await?;
//!
//! let page = client
//!     .products()
//!     .list_all(&ProductListParams::new().active(true))
//!     .await?;
//! println!("{} active products, first is {}", page.data.len(), product.id);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{non_empty, Expandable};
use crate::api::common::{ApiError, DeletedObject, HasId, List, ListParams, SearchParams, SearchResult};
use crate::api::handler::ApiHandler;
use crate::api::params::{Params, ToParams, Value};
use crate::api::request::RouteGroup;

/// Collection path of the products API.
pub const PRODUCTS_PATH: &str = "v1/products";

/// A Stripe product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, e.g. `prod_NWjs8kKbJWmuuc`.
    pub id: String,

    /// Always `product`.
    #[serde(default)]
    pub object: String,

    /// Whether the product is available for purchase.
    #[serde(default)]
    pub active: bool,

    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,

    /// The default price, as an ID unless expanded.
    #[serde(default)]
    pub default_price: Option<Expandable<Price>>,

    #[serde(default)]
    pub description: Option<String>,

    /// Up to eight image URLs.
    #[serde(default)]
    pub images: Vec<String>,

    /// `true` for live mode, `false` for test mode.
    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Display name shown to customers.
    pub name: String,

    #[serde(default)]
    pub package_dimensions: Option<PackageDimensions>,

    /// Whether the product is a physical good.
    #[serde(default)]
    pub shippable: Option<bool>,

    #[serde(default)]
    pub statement_descriptor: Option<String>,

    /// Tax code ID, e.g. `txcd_10000000`.
    #[serde(default)]
    pub tax_code: Option<String>,

    #[serde(default)]
    pub unit_label: Option<String>,

    /// Unix timestamp of the last update.
    #[serde(default)]
    pub updated: Option<i64>,

    #[serde(default)]
    pub url: Option<String>,
}

impl HasId for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Shipping dimensions of a product. Inches and ounces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDimensions {
    pub height: f64,
    pub length: f64,
    pub weight: f64,
    pub width: f64,
}

impl From<&PackageDimensions> for Value {
    fn from(dimensions: &PackageDimensions) -> Self {
        Params::new()
            .with("height", dimensions.height)
            .with("length", dimensions.length)
            .with("weight", dimensions.weight)
            .with("width", dimensions.width)
            .into()
    }
}

/// A price, as returned when `default_price` is expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub active: bool,

    /// Three-letter ISO currency code, lowercase.
    pub currency: String,

    /// Amount in the smallest currency unit.
    #[serde(default)]
    pub unit_amount: Option<i64>,

    #[serde(default)]
    pub unit_amount_decimal: Option<String>,

    /// Present for subscription prices.
    #[serde(default)]
    pub recurring: Option<Recurring>,

    #[serde(default)]
    pub tax_behavior: Option<TaxBehavior>,
}

impl HasId for Price {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Billing frequency of a recurring price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Day,
    Week,
    Month,
    Year,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::Day => "day",
            RecurringInterval::Week => "week",
            RecurringInterval::Month => "month",
            RecurringInterval::Year => "year",
        }
    }
}

impl fmt::Display for RecurringInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurringInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(RecurringInterval::Day),
            "week" => Ok(RecurringInterval::Week),
            "month" => Ok(RecurringInterval::Month),
            "year" => Ok(RecurringInterval::Year),
            other => Err(format!("Invalid interval '{other}', expected day, week, month or year")),
        }
    }
}

/// Recurring component of a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: RecurringInterval,

    /// Number of intervals between bills; Stripe defaults to 1.
    #[serde(default)]
    pub interval_count: Option<u32>,
}

impl Recurring {
    pub fn new(interval: RecurringInterval) -> Self {
        Self {
            interval,
            interval_count: None,
        }
    }

    pub fn interval_count(mut self, count: u32) -> Self {
        self.interval_count = Some(count);
        self
    }
}

impl From<&Recurring> for Value {
    fn from(recurring: &Recurring) -> Self {
        Params::new()
            .with("interval", recurring.interval.as_str())
            .with_opt("interval_count", recurring.interval_count)
            .into()
    }
}

/// Whether a price includes tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxBehavior {
    Inclusive,
    Exclusive,
    Unspecified,
}

impl TaxBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxBehavior::Inclusive => "inclusive",
            TaxBehavior::Exclusive => "exclusive",
            TaxBehavior::Unspecified => "unspecified",
        }
    }
}

/// Inline price created together with a product (`default_price_data`).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceData {
    pub currency: String,
    pub unit_amount: Option<i64>,
    /// Decimal amount with up to 12 places, as a string.
    pub unit_amount_decimal: Option<String>,
    pub recurring: Option<Recurring>,
    pub tax_behavior: Option<TaxBehavior>,
}

impl PriceData {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            unit_amount: None,
            unit_amount_decimal: None,
            recurring: None,
            tax_behavior: None,
        }
    }

    pub fn unit_amount(mut self, amount: i64) -> Self {
        self.unit_amount = Some(amount);
        self
    }

    pub fn unit_amount_decimal(mut self, amount: impl Into<String>) -> Self {
        self.unit_amount_decimal = Some(amount.into());
        self
    }

    pub fn recurring(mut self, recurring: Recurring) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn tax_behavior(mut self, behavior: TaxBehavior) -> Self {
        self.tax_behavior = Some(behavior);
        self
    }
}

impl From<&PriceData> for Value {
    fn from(data: &PriceData) -> Self {
        Params::new()
            .with("currency", &data.currency)
            .with_opt("unit_amount", data.unit_amount)
            .with_opt("unit_amount_decimal", data.unit_amount_decimal.as_ref())
            .with_opt("recurring", data.recurring.as_ref())
            .with_opt("tax_behavior", data.tax_behavior.map(|t| t.as_str()))
            .into()
    }
}

/// Parameters for `POST /v1/products`.
///
/// Only `name` is required. Every other field is sent only when set.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductParams {
    /// Custom product ID; Stripe generates one when absent.
    pub id: Option<String>,
    pub name: String,
    pub active: Option<bool>,
    pub description: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub default_price_data: Option<PriceData>,
    pub images: Option<Vec<String>>,
    pub package_dimensions: Option<PackageDimensions>,
    pub shippable: Option<bool>,
    pub statement_descriptor: Option<String>,
    pub tax_code: Option<String>,
    pub unit_label: Option<String>,
    pub url: Option<String>,
    pub expand: Option<Vec<String>>,
}

impl CreateProductParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            active: None,
            description: None,
            metadata: None,
            default_price_data: None,
            images: None,
            package_dimensions: None,
            shippable: None,
            statement_descriptor: None,
            tax_code: None,
            unit_label: None,
            url: None,
            expand: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds one metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn default_price_data(mut self, data: PriceData) -> Self {
        self.default_price_data = Some(data);
        self
    }

    /// Adds one image URL.
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.get_or_insert_with(Vec::new).push(url.into());
        self
    }

    pub fn package_dimensions(mut self, dimensions: PackageDimensions) -> Self {
        self.package_dimensions = Some(dimensions);
        self
    }

    pub fn shippable(mut self, shippable: bool) -> Self {
        self.shippable = Some(shippable);
        self
    }

    pub fn statement_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.statement_descriptor = Some(descriptor.into());
        self
    }

    pub fn tax_code(mut self, code: impl Into<String>) -> Self {
        self.tax_code = Some(code.into());
        self
    }

    pub fn unit_label(mut self, label: impl Into<String>) -> Self {
        self.unit_label = Some(label.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn expand(mut self, fields: Vec<String>) -> Self {
        self.expand = Some(fields);
        self
    }
}

impl ToParams for CreateProductParams {
    fn to_params(&self) -> Params {
        Params::new()
            .with("name", &self.name)
            .with_opt("id", self.id.as_ref())
            .with_opt("active", self.active)
            .with_opt("description", self.description.as_ref())
            .with_opt("metadata", self.metadata.clone())
            .with_opt("default_price_data", self.default_price_data.as_ref())
            .with_opt("images", self.images.clone())
            .with_opt("package_dimensions", self.package_dimensions.as_ref())
            .with_opt("shippable", self.shippable)
            .with_opt("statement_descriptor", self.statement_descriptor.as_ref())
            .with_opt("tax_code", self.tax_code.as_ref())
            .with_opt("unit_label", self.unit_label.as_ref())
            .with_opt("url", self.url.as_ref())
            .with_opt("expand", self.expand.clone())
    }
}

/// Parameters for `POST /v1/products/{id}`.
///
/// Fields left `None` are not changed. To clear a field send an empty
/// value: `Some(String::new())` for text, an empty map for all metadata, an
/// empty string under one metadata key to remove just that key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProductParams {
    pub active: Option<bool>,
    /// ID of an existing price to make the default.
    pub default_price: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub name: Option<String>,
    pub images: Option<Vec<String>>,
    pub package_dimensions: Option<PackageDimensions>,
    pub shippable: Option<bool>,
    pub statement_descriptor: Option<String>,
    pub tax_code: Option<String>,
    pub unit_label: Option<String>,
    pub url: Option<String>,
    pub expand: Option<Vec<String>>,
}

impl UpdateProductParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn default_price(mut self, price: impl Into<String>) -> Self {
        self.default_price = Some(price.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Removes every metadata key (`metadata=`).
    pub fn clear_metadata(mut self) -> Self {
        self.metadata = Some(BTreeMap::new());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn images(mut self, urls: Vec<String>) -> Self {
        self.images = Some(urls);
        self
    }

    pub fn package_dimensions(mut self, dimensions: PackageDimensions) -> Self {
        self.package_dimensions = Some(dimensions);
        self
    }

    pub fn shippable(mut self, shippable: bool) -> Self {
        self.shippable = Some(shippable);
        self
    }

    pub fn statement_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.statement_descriptor = Some(descriptor.into());
        self
    }

    pub fn tax_code(mut self, code: impl Into<String>) -> Self {
        self.tax_code = Some(code.into());
        self
    }

    pub fn unit_label(mut self, label: impl Into<String>) -> Self {
        self.unit_label = Some(label.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn expand(mut self, fields: Vec<String>) -> Self {
        self.expand = Some(fields);
        self
    }
}

impl ToParams for UpdateProductParams {
    fn to_params(&self) -> Params {
        Params::new()
            .with_opt("active", self.active)
            .with_opt("default_price", self.default_price.as_ref())
            .with_opt("description", self.description.as_ref())
            .with_opt("metadata", self.metadata.clone())
            .with_opt("name", self.name.as_ref())
            .with_opt("images", self.images.clone())
            .with_opt("package_dimensions", self.package_dimensions.as_ref())
            .with_opt("shippable", self.shippable)
            .with_opt("statement_descriptor", self.statement_descriptor.as_ref())
            .with_opt("tax_code", self.tax_code.as_ref())
            .with_opt("unit_label", self.unit_label.as_ref())
            .with_opt("url", self.url.as_ref())
            .with_opt("expand", self.expand.clone())
    }
}

/// Filters for `GET /v1/products`.
#[derive(Debug, Clone, Default)]
pub struct ProductListParams {
    /// Cursor, limit, `created` and `expand`.
    pub list: ListParams,
    pub active: Option<bool>,
    /// Only return products with these IDs.
    pub ids: Option<Vec<String>>,
    pub shippable: Option<bool>,
    pub url: Option<String>,
}

impl ProductListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(mut self, list: ListParams) -> Self {
        self.list = list;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn shippable(mut self, shippable: bool) -> Self {
        self.shippable = Some(shippable);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl ToParams for ProductListParams {
    fn to_params(&self) -> Params {
        self.list.to_params().merge(
            Params::new()
                .with_opt("active", self.active)
                .with_opt("ids", self.ids.clone())
                .with_opt("shippable", self.shippable)
                .with_opt("url", self.url.as_ref()),
        )
    }
}

/// Typed routes for `v1/products`.
pub struct ProductRoutes<'a, H> {
    routes: RouteGroup<'a, H>,
}

impl<'a, H: ApiHandler> ProductRoutes<'a, H> {
    pub fn new(handler: &'a H) -> Self {
        Self {
            routes: RouteGroup::new(handler, PRODUCTS_PATH),
        }
    }

    /// Adds a header sent with every request made through these routes.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.routes = self.routes.with_header(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        self.routes.headers()
    }

    /// Creates a new product.
    pub async fn create(&self, params: &CreateProductParams) -> Result<Product, ApiError> {
        self.routes.create(params).await
    }

    /// Retrieves a product by ID. `expand` may be empty.
    pub async fn retrieve(&self, id: &str, expand: &[String]) -> Result<Product, ApiError> {
        let params = Params::new().with_opt("expand", non_empty(expand));
        self.routes.retrieve(id, &params).await
    }

    /// Updates a product. Fields not set in `params` are left unchanged.
    pub async fn update(&self, id: &str, params: &UpdateProductParams) -> Result<Product, ApiError> {
        self.routes.update(id, params).await
    }

    /// Lists products, newest first.
    pub async fn list_all(&self, params: &ProductListParams) -> Result<List<Product>, ApiError> {
        self.routes.list(params).await
    }

    /// Lists products with a free-form filter bag.
    pub async fn list_all_with(&self, filter: &Params) -> Result<List<Product>, ApiError> {
        self.routes.list(filter).await
    }

    /// Deletes a product. Only possible while it has no prices.
    pub async fn delete(&self, id: &str) -> Result<DeletedObject, ApiError> {
        self.routes.delete(id).await
    }

    /// Searches products with Stripe's search query language.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResult<Product>, ApiError> {
        self.routes.search(params).await
    }
}
