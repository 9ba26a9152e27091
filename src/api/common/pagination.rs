//
//  stripe-kit
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Stripe API Responses
//!
//! Stripe pages through collections in two ways, and these types cover both:
//!
//! | Type | Endpoint | Strategy |
//! |------|----------|----------|
//! | [`List`] | `GET /v1/<resource>` | Cursor on object IDs (`starting_after`) |
//! | [`SearchResult`] | `GET /v1/<resource>/search` | Opaque `next_page` token |
//!
//! The request side mirrors them: [`ListParams`] carries the cursor fields
//! every list endpoint accepts, [`SearchParams`] the search fields.
//!
//! # Example
//!
//! ```rust
//! use stripe_kit::api::common::{List, ListParams};
//! use stripe_kit::api::resources::products::Product;
//!
//! fn next_page(page: &List<Product>) -> Option<ListParams> {
//!     page.next_cursor().map(|id| ListParams::new().limit(100).starting_after(id))
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::params::{Params, ToParams, Value};

/// A Stripe object with an `id`, used to derive list cursors.
pub trait HasId {
    fn id(&self) -> &str;
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List<T> {
    /// Always `list`.
    #[serde(default)]
    pub object: String,

    /// The objects on this page, newest first.
    pub data: Vec<T>,

    /// Whether more objects exist after this page.
    #[serde(default)]
    pub has_more: bool,

    /// The URL this list was fetched from.
    #[serde(default)]
    pub url: String,
}

impl<T> List<T> {
    pub fn has_next(&self) -> bool {
        self.has_more
    }
}

impl<T: HasId> List<T> {
    /// The `starting_after` cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_more {
            return None;
        }
        self.data.last().map(HasId::id)
    }
}

/// One page of a search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Always `search_result`.
    #[serde(default)]
    pub object: String,

    pub data: Vec<T>,

    #[serde(default)]
    pub has_more: bool,

    /// Token to pass as `page` for the next page.
    #[serde(default)]
    pub next_page: Option<String>,

    #[serde(default)]
    pub url: String,

    /// Only present when `total_count` was expanded.
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> SearchResult<T> {
    pub fn has_next(&self) -> bool {
        self.has_more && self.next_page.is_some()
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }
}

/// A timestamp filter: an exact value or any combination of bounds.
///
/// Encodes as `created=1700000000` or `created[gte]=...&created[lt]=...`.
/// A `Bounds` with no bound set matches everything and is left out of
/// [`ListParams`] entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeQuery {
    Exact(i64),
    Bounds {
        gt: Option<i64>,
        gte: Option<i64>,
        lt: Option<i64>,
        lte: Option<i64>,
    },
}

impl RangeQuery {
    /// Matches timestamps at or after `from` and strictly before `until`.
    pub fn between(from: i64, until: i64) -> Self {
        RangeQuery::Bounds {
            gt: None,
            gte: Some(from),
            lt: Some(until),
            lte: None,
        }
    }

    /// `true` for a `Bounds` with every bound unset.
    pub fn is_unbounded(&self) -> bool {
        matches!(
            self,
            RangeQuery::Bounds {
                gt: None,
                gte: None,
                lt: None,
                lte: None,
            }
        )
    }
}

impl From<&RangeQuery> for Value {
    fn from(range: &RangeQuery) -> Self {
        match range {
            RangeQuery::Exact(ts) => Value::from(*ts),
            RangeQuery::Bounds { gt, gte, lt, lte } => Params::new()
                .with_opt("gt", *gt)
                .with_opt("gte", *gte)
                .with_opt("lt", *lt)
                .with_opt("lte", *lte)
                .into(),
        }
    }
}

/// Cursor fields shared by every list endpoint.
///
/// Resource-specific filters are layered on top with [`Params::merge`].
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// 1 to 100, Stripe defaults to 10.
    pub limit: Option<u32>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub created: Option<RangeQuery>,
    pub expand: Option<Vec<String>>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    pub fn created(mut self, range: RangeQuery) -> Self {
        self.created = Some(range);
        self
    }

    pub fn expand(mut self, fields: Vec<String>) -> Self {
        self.expand = Some(fields);
        self
    }
}

impl ToParams for ListParams {
    fn to_params(&self) -> Params {
        Params::new()
            .with_opt("limit", self.limit)
            .with_opt("starting_after", self.starting_after.as_ref())
            .with_opt("ending_before", self.ending_before.as_ref())
            .with_opt(
                "created",
                self.created.as_ref().filter(|range| !range.is_unbounded()),
            )
            .with_opt("expand", self.expand.clone())
    }
}

/// Parameters for a `/search` endpoint.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search query, e.g. `active:'true' AND metadata['order_id']:'6735'`.
    pub query: String,
    /// 1 to 100, Stripe defaults to 10.
    pub limit: Option<u32>,
    /// `next_page` token from a previous result.
    pub page: Option<String>,
    pub expand: Option<Vec<String>>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            page: None,
            expand: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn expand(mut self, fields: Vec<String>) -> Self {
        self.expand = Some(fields);
        self
    }
}

impl ToParams for SearchParams {
    fn to_params(&self) -> Params {
        Params::new()
            .with("query", &self.query)
            .with_opt("limit", self.limit)
            .with_opt("page", self.page.as_ref())
            .with_opt("expand", self.expand.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::encode;

    #[derive(Debug, Clone, Deserialize)]
    struct Item {
        id: String,
    }

    impl HasId for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_list_next_cursor() {
        let json = r#"{
            "object": "list",
            "data": [{"id": "prod_3"}, {"id": "prod_2"}],
            "has_more": true,
            "url": "/v1/products"
        }"#;
        let page: List<Item> = serde_json::from_str(json).unwrap();
        assert!(page.has_next());
        assert_eq!(page.next_cursor(), Some("prod_2"));
    }

    #[test]
    fn test_last_page_has_no_cursor() {
        let json = r#"{"object": "list", "data": [{"id": "prod_1"}], "has_more": false, "url": "/v1/products"}"#;
        let page: List<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_search_result_next_page() {
        let json = r#"{
            "object": "search_result",
            "data": [],
            "has_more": true,
            "next_page": "WzE2OTk5MjM0NTZd",
            "url": "/v1/products/search"
        }"#;
        let page: SearchResult<Item> = serde_json::from_str(json).unwrap();
        assert!(page.has_next());
        assert_eq!(page.next_page(), Some("WzE2OTk5MjM0NTZd"));
        assert_eq!(page.total_count, None);
    }

    #[test]
    fn test_list_params_omit_absent_fields() {
        let params = ListParams::new().limit(5).to_params();
        assert_eq!(encode(&params).unwrap(), "limit=5");
    }

    #[test]
    fn test_created_range_encoding() {
        let params = ListParams::new()
            .created(RangeQuery::between(1_700_000_000, 1_800_000_000))
            .to_params();
        assert_eq!(
            encode(&params).unwrap(),
            "created[gte]=1700000000&created[lt]=1800000000"
        );

        let exact = ListParams::new().created(RangeQuery::Exact(42)).to_params();
        assert_eq!(encode(&exact).unwrap(), "created=42");
    }

    #[test]
    fn test_unbounded_range_is_omitted() {
        let unbounded = RangeQuery::Bounds {
            gt: None,
            gte: None,
            lt: None,
            lte: None,
        };
        assert!(unbounded.is_unbounded());
        assert!(!RangeQuery::Exact(0).is_unbounded());
        assert!(!RangeQuery::between(1, 2).is_unbounded());

        let params = ListParams::new().limit(3).created(unbounded).to_params();
        assert_eq!(encode(&params).unwrap(), "limit=3");
    }

    #[test]
    fn test_search_params() {
        let params = SearchParams::new("active:'true'").limit(20).page("tok").to_params();
        assert_eq!(
            encode(&params).unwrap(),
            "limit=20&page=tok&query=active%3A%27true%27"
        );
    }
}
