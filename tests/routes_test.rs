//! Route method tests against a recording handler.
//!
//! Nothing here touches the network: every request is captured and
//! answered with a canned JSON body.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use stripe_kit::api::common::{ListParams, RangeQuery, SearchParams};
use stripe_kit::api::params::Params;
use stripe_kit::api::resources::customers::{Address, CustomerListParams, CustomerParams, CustomerRoutes};
use stripe_kit::api::resources::products::{
    CreateProductParams, PriceData, ProductListParams, ProductRoutes, Recurring, RecurringInterval,
    UpdateProductParams,
};
use stripe_kit::api::{ApiError, ApiHandler};

#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    body: Option<String>,
    headers: HeaderMap,
}

struct RecordingHandler {
    response: String,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingHandler {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn product() -> Self {
        Self::new(r#"{"id": "prod_1", "object": "product", "name": "Mug", "active": true}"#)
    }

    fn customer() -> Self {
        Self::new(r#"{"id": "cus_1", "object": "customer"}"#)
    }

    fn list() -> Self {
        Self::new(r#"{"object": "list", "url": "/v1/x", "has_more": false, "data": []}"#)
    }

    fn search() -> Self {
        Self::new(r#"{"object": "search_result", "url": "/v1/x", "has_more": false, "data": []}"#)
    }

    fn deleted() -> Self {
        Self::new(r#"{"id": "prod_1", "object": "product", "deleted": true}"#)
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn only(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl ApiHandler for RecordingHandler {
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
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            query,
            body,
            headers: headers.clone(),
        });
        Ok(serde_json::from_str(&self.response)?)
    }
}

#[tokio::test]
async fn test_product_create_posts_form_body() {
    let handler = RecordingHandler::product();
    let params = CreateProductParams::new("Gold plan")
        .active(true)
        .metadata("tier", "gold")
        .default_price_data(
            PriceData::new("usd")
                .unit_amount(2000)
                .recurring(Recurring::new(RecurringInterval::Month)),
        );

    let product = ProductRoutes::new(&handler).create(&params).await.unwrap();

    assert_eq!(product.id, "prod_1");
    let request = handler.only();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "v1/products");
    assert_eq!(request.query, None);
    assert_eq!(
        request.body.as_deref(),
        Some(
            "active=true\
             &default_price_data[currency]=usd\
             &default_price_data[recurring][interval]=month\
             &default_price_data[unit_amount]=2000\
             &metadata[tier]=gold\
             &name=Gold%20plan"
        )
    );
}

#[tokio::test]
async fn test_product_retrieve_without_expand_sends_no_query() {
    let handler = RecordingHandler::product();

    ProductRoutes::new(&handler).retrieve("prod_1", &[]).await.unwrap();

    let request = handler.only();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "v1/products/prod_1");
    assert_eq!(request.query, None);
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_product_retrieve_escapes_id() {
    let handler = RecordingHandler::product();

    ProductRoutes::new(&handler)
        .retrieve("prod 1/2", &["default_price".to_string()])
        .await
        .unwrap();

    let request = handler.only();
    assert_eq!(request.path, "v1/products/prod%201%2F2");
    assert_eq!(request.query.as_deref(), Some("expand[0]=default_price"));
}

#[tokio::test]
async fn test_product_update_omits_absent_fields() {
    let handler = RecordingHandler::product();
    let params = UpdateProductParams::new()
        .name("Large mug")
        .images(Vec::new());

    ProductRoutes::new(&handler).update("prod_1", &params).await.unwrap();

    let request = handler.only();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "v1/products/prod_1");
    assert_eq!(request.body.as_deref(), Some("images=&name=Large%20mug"));
}

#[tokio::test]
async fn test_empty_update_posts_no_body() {
    let handler = RecordingHandler::product();

    ProductRoutes::new(&handler)
        .update("prod_1", &UpdateProductParams::default())
        .await
        .unwrap();

    let request = handler.only();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_product_list_all_encodes_filters_in_query() {
    let handler = RecordingHandler::list();
    let params = ProductListParams::new()
        .active(false)
        .ids(vec!["prod_1".to_string(), "prod_2".to_string()])
        .list(
            ListParams::new()
                .limit(3)
                .created(RangeQuery::between(100, 200)),
        );

    let page = ProductRoutes::new(&handler).list_all(&params).await.unwrap();

    assert!(page.data.is_empty());
    let request = handler.only();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "v1/products");
    assert_eq!(request.body, None);
    assert_eq!(
        request.query.as_deref(),
        Some("active=false&created[gte]=100&created[lt]=200&ids[0]=prod_1&ids[1]=prod_2&limit=3")
    );
}

#[tokio::test]
async fn test_product_list_all_with_free_form_filter() {
    let handler = RecordingHandler::list();
    let filter = Params::new().with("limit", 1).with("shippable", true);

    ProductRoutes::new(&handler).list_all_with(&filter).await.unwrap();

    assert_eq!(handler.only().query.as_deref(), Some("limit=1&shippable=true"));
}

#[tokio::test]
async fn test_product_delete_sends_no_params() {
    let handler = RecordingHandler::deleted();

    let deleted = ProductRoutes::new(&handler).delete("prod_1").await.unwrap();

    assert!(deleted.deleted);
    let request = handler.only();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "v1/products/prod_1");
    assert_eq!(request.query, None);
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_product_search_targets_search_path() {
    let handler = RecordingHandler::search();
    let params = SearchParams::new("name~'mug' AND active:'true'")
        .limit(10)
        .page("page_abc")
        .expand(vec!["data.default_price".to_string()]);

    ProductRoutes::new(&handler).search(&params).await.unwrap();

    let request = handler.only();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "v1/products/search");
    assert_eq!(
        request.query.as_deref(),
        Some(
            "expand[0]=data.default_price\
             &limit=10\
             &page=page_abc\
             &query=name~%27mug%27%20AND%20active%3A%27true%27"
        )
    );
}

#[tokio::test]
async fn test_route_headers_are_forwarded() {
    let handler = RecordingHandler::product();

    ProductRoutes::new(&handler)
        .with_header(
            HeaderName::from_static("idempotency-key"),
            HeaderValue::from_static("key-1"),
        )
        .create(&CreateProductParams::new("Mug"))
        .await
        .unwrap();

    let request = handler.only();
    assert_eq!(request.headers.get("idempotency-key").unwrap(), "key-1");
}

#[tokio::test]
async fn test_encode_failure_sends_nothing() {
    let handler = RecordingHandler::product();
    let filter = Params::new().with("limit", f64::INFINITY);

    let err = ProductRoutes::new(&handler)
        .list_all_with(&filter)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Encode(_)));
    assert!(!err.is_transport());
    assert!(handler.requests().is_empty());
}

#[tokio::test]
async fn test_customer_routes() {
    let handler = RecordingHandler::customer();
    let routes = CustomerRoutes::new(&handler);

    let params = CustomerParams::new()
        .email("jenny@example.com")
        .address(Address {
            line1: Some("1 Main St".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        })
        .preferred_locales(vec!["en".to_string()]);
    routes.create(&params).await.unwrap();
    routes.retrieve("cus_1", &[]).await.unwrap();
    routes
        .update("cus_1", &CustomerParams::new().balance(-500))
        .await
        .unwrap();

    let requests = handler.requests();
    assert_eq!(requests.len(), 3);

    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "v1/customers");
    assert_eq!(
        requests[0].body.as_deref(),
        Some(
            "address[country]=US&address[line1]=1%20Main%20St\
             &email=jenny%40example.com&preferred_locales[0]=en"
        )
    );

    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].path, "v1/customers/cus_1");

    assert_eq!(requests[2].path, "v1/customers/cus_1");
    assert_eq!(requests[2].body.as_deref(), Some("balance=-500"));
}

#[tokio::test]
async fn test_customer_list_and_search() {
    let list_handler = RecordingHandler::list();
    CustomerRoutes::new(&list_handler)
        .list_all(
            &CustomerListParams::new()
                .email("a@b.co")
                .list(ListParams::new().starting_after("cus_9")),
        )
        .await
        .unwrap();
    let request = list_handler.only();
    assert_eq!(request.path, "v1/customers");
    assert_eq!(
        request.query.as_deref(),
        Some("email=a%40b.co&starting_after=cus_9")
    );

    let search_handler = RecordingHandler::search();
    CustomerRoutes::new(&search_handler)
        .search(&SearchParams::new("email:'a@b.co'"))
        .await
        .unwrap();
    let request = search_handler.only();
    assert_eq!(request.path, "v1/customers/search");
    assert_eq!(
        request.query.as_deref(),
        Some("query=email%3A%27a%40b.co%27")
    );
}

#[test]
fn test_customer_delete_blocking() {
    let handler = RecordingHandler::new(r#"{"id": "cus_1", "object": "customer", "deleted": true}"#);

    let deleted = tokio_test::block_on(CustomerRoutes::new(&handler).delete("cus_1")).unwrap();

    assert_eq!(deleted.id, "cus_1");
    assert_eq!(deleted.object, "customer");
    let request = handler.only();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "v1/customers/cus_1");
}
