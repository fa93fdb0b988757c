//! Integration tests for `HttpCatalog` and `StoreFinder` over HTTP.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shoplist_core::LocationData;
use shoplist_locator::{HttpCatalog, LocatorError, StoreCatalog, StoreFinder};

/// 5-second timeout, no retries.
fn test_catalog(server: &MockServer) -> HttpCatalog {
    HttpCatalog::new(&format!("{}/stores", server.uri()), 5, "shoplist-test/0.1", 0, 0)
        .expect("failed to build test HttpCatalog")
}

fn stores_json() -> serde_json::Value {
    json!([
        {
            "id": "1",
            "name": "Grocery Store",
            "address": "123 Main St",
            "latitude": 40.7128,
            "longitude": -74.006,
            "distance": 50,
            "availableItems": [
                { "name": "Milk", "inStock": true, "price": 3.99 },
                { "name": "Eggs", "inStock": false }
            ]
        },
        {
            "id": "2",
            "name": "Supermarket",
            "address": "456 Oak Ave",
            "latitude": 40.7138,
            "longitude": -74.007,
            "availableItems": [
                { "name": "Coffee", "inStock": true, "price": 8.99 }
            ]
        }
    ])
}

fn city_hall() -> LocationData {
    LocationData::now(40.7128, -74.006, 10.0)
}

#[tokio::test]
async fn lists_stores_from_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stores_json()))
        .mount(&server)
        .await;

    let stores = test_catalog(&server).list_candidate_stores().await.unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].available_items[1].price, None);
}

#[tokio::test]
async fn lists_stores_from_wrapped_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stores": stores_json() })))
        .mount(&server)
        .await;

    let stores = test_catalog(&server).list_candidate_stores().await.unwrap();
    assert_eq!(stores[1].name, "Supermarket");
}

#[tokio::test]
async fn empty_catalog_is_ok_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let finder = StoreFinder::new(test_catalog(&server));
    let result = finder.find_nearby_stores(&city_hall(), Some(500.0), &[]).await;
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_is_a_fetch_failure_not_zero_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let finder = StoreFinder::new(test_catalog(&server));
    let err = finder
        .find_nearby_stores(&city_hall(), Some(500.0), &[])
        .await
        .unwrap_err();
    assert!(
        matches!(err, LocatorError::HttpStatus { status: 503, .. }),
        "got {err:?}"
    );
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn malformed_body_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_catalog(&server)
        .list_candidate_stores()
        .await
        .unwrap_err();
    assert!(matches!(err, LocatorError::Deserialize { .. }), "got {err:?}");
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn invalid_store_data_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "x", "name": "X", "address": "", "latitude": 200.0, "longitude": 0.0 }
        ])))
        .mount(&server)
        .await;

    let err = test_catalog(&server)
        .list_candidate_stores()
        .await
        .unwrap_err();
    assert!(matches!(err, LocatorError::Catalog(_)), "got {err:?}");
    assert!(!err.is_fetch_failure());
}

#[tokio::test]
async fn retries_transient_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stores_json()))
        .mount(&server)
        .await;

    let catalog =
        HttpCatalog::new(&format!("{}/stores", server.uri()), 5, "shoplist-test/0.1", 2, 0)
            .unwrap();
    let stores = catalog.list_candidate_stores().await.unwrap();
    assert_eq!(stores.len(), 2);
}

#[tokio::test]
async fn finder_filters_remote_stores() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stores_json()))
        .mount(&server)
        .await;

    let finder = StoreFinder::new(test_catalog(&server));
    let milk = finder
        .find_nearby_stores(&city_hall(), Some(500.0), &["MILK".to_string()])
        .await
        .unwrap();
    assert_eq!(milk.len(), 1);
    assert_eq!(milk[0].id, "1");
    assert!(milk[0].distance.abs() < f64::EPSILON, "distance is recomputed");

    let details = finder.store_details("2").await.unwrap().unwrap();
    assert_eq!(details.address, "456 Oak Ave");
}
