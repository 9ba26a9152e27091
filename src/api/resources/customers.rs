//
//  stripe-kit
//  api/resources/customers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Customer API types and routes.
//!
//! Customers track recurring charges, saved payment methods and the
//! contact details a business keeps for a buyer.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::api::common::{ApiError, DeletedObject, HasId, List, ListParams, SearchParams, SearchResult};
use crate::api::handler::ApiHandler;
use crate::api::params::{Params, ToParams, Value};
use crate::api::request::RouteGroup;

/// Collection path of the customers API.
pub const CUSTOMERS_PATH: &str = "v1/customers";

/// A Stripe customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier, e.g. `cus_NffrFeUfNV2Hib`.
    pub id: String,

    #[serde(default)]
    pub object: String,

    #[serde(default)]
    pub address: Option<Address>,

    /// Credit (negative) or debt (positive) applied to the next invoice,
    /// in the smallest currency unit.
    #[serde(default)]
    pub balance: i64,

    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub delinquent: Option<bool>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub livemode: bool,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Locales in order of preference, e.g. `["fr-FR", "en"]`.
    #[serde(default)]
    pub preferred_locales: Vec<String>,
}

impl HasId for Customer {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    /// Two-letter ISO country code.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl From<&Address> for Value {
    fn from(address: &Address) -> Self {
        Params::new()
            .with_opt("city", address.city.as_ref())
            .with_opt("country", address.country.as_ref())
            .with_opt("line1", address.line1.as_ref())
            .with_opt("line2", address.line2.as_ref())
            .with_opt("postal_code", address.postal_code.as_ref())
            .with_opt("state", address.state.as_ref())
            .into()
    }
}

/// Fields accepted by both `POST /v1/customers` and
/// `POST /v1/customers/{id}`. None are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerParams {
    pub address: Option<Address>,
    pub balance: Option<i64>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub preferred_locales: Option<Vec<String>>,
    pub expand: Option<Vec<String>>,
}

impl CustomerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn preferred_locales(mut self, locales: Vec<String>) -> Self {
        self.preferred_locales = Some(locales);
        self
    }

    pub fn expand(mut self, fields: Vec<String>) -> Self {
        self.expand = Some(fields);
        self
    }
}

impl ToParams for CustomerParams {
    fn to_params(&self) -> Params {
        Params::new()
            .with_opt("address", self.address.as_ref())
            .with_opt("balance", self.balance)
            .with_opt("description", self.description.as_ref())
            .with_opt("email", self.email.as_ref())
            .with_opt("metadata", self.metadata.clone())
            .with_opt("name", self.name.as_ref())
            .with_opt("phone", self.phone.as_ref())
            .with_opt("preferred_locales", self.preferred_locales.clone())
            .with_opt("expand", self.expand.clone())
    }
}

/// Filters for `GET /v1/customers`.
#[derive(Debug, Clone, Default)]
pub struct CustomerListParams {
    pub list: ListParams,
    /// Case-sensitive exact match.
    pub email: Option<String>,
}

impl CustomerListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(mut self, list: ListParams) -> Self {
        self.list = list;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl ToParams for CustomerListParams {
    fn to_params(&self) -> Params {
        self.list
            .to_params()
            .merge(Params::new().with_opt("email", self.email.as_ref()))
    }
}

/// Typed routes for `v1/customers`.
pub struct CustomerRoutes<'a, H> {
    routes: RouteGroup<'a, H>,
}

impl<'a, H: ApiHandler> CustomerRoutes<'a, H> {
    pub fn new(handler: &'a H) -> Self {
        Self {
            routes: RouteGroup::new(handler, CUSTOMERS_PATH),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.routes = self.routes.with_header(name, value);
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        self.routes.headers()
    }

    pub async fn create(&self, params: &CustomerParams) -> Result<Customer, ApiError> {
        self.routes.create(params).await
    }

    pub async fn retrieve(&self, id: &str, expand: &[String]) -> Result<Customer, ApiError> {
        let params = Params::new().with_opt("expand", non_empty(expand));
        self.routes.retrieve(id, &params).await
    }

    pub async fn update(&self, id: &str, params: &CustomerParams) -> Result<Customer, ApiError> {
        self.routes.update(id, params).await
    }

    pub async fn list_all(&self, params: &CustomerListParams) -> Result<List<Customer>, ApiError> {
        self.routes.list(params).await
    }

    pub async fn list_all_with(&self, filter: &Params) -> Result<List<Customer>, ApiError> {
        self.routes.list(filter).await
    }

    /// Permanently deletes a customer and cancels its subscriptions.
    pub async fn delete(&self, id: &str) -> Result<DeletedObject, ApiError> {
        self.routes.delete(id).await
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResult<Customer>, ApiError> {
        self.routes.search(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::encode;

    #[test]
    fn test_address_only_sends_present_lines() {
        let params = CustomerParams::new()
            .email("jenny@example.com")
            .address(Address {
                city: Some("San Francisco".to_string()),
                country: Some("US".to_string()),
                ..Default::default()
            })
            .to_params();

        assert_eq!(
            encode(&params).unwrap(),
            "address[city]=San%20Francisco&address[country]=US&email=jenny%40example.com"
        );
    }

    #[test]
    fn test_negative_balance_and_locales() {
        let params = CustomerParams::new()
            .balance(-500)
            .preferred_locales(vec!["fr-FR".to_string(), "en".to_string()])
            .to_params();

        assert_eq!(
            encode(&params).unwrap(),
            "balance=-500&preferred_locales[0]=fr-FR&preferred_locales[1]=en"
        );
    }

    #[test]
    fn test_list_params() {
        let params = CustomerListParams::new()
            .email("a+b@example.com")
            .list(ListParams::new().limit(10).starting_after("cus_9"))
            .to_params();

        assert_eq!(
            encode(&params).unwrap(),
            "email=a%2Bb%40example.com&limit=10&starting_after=cus_9"
        );
    }

    #[test]
    fn test_customer_deserializes_with_missing_fields() {
        let json = r#"{"id": "cus_1", "object": "customer", "email": null, "created": 1680893993}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id(), "cus_1");
        assert_eq!(customer.balance, 0);
        assert!(customer.preferred_locales.is_empty());
    }
}
