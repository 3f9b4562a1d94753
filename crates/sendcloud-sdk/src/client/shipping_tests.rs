//! Tests for shipping method and sender address operations.

use super::*;
use crate::client::tests::test_client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shipping_method_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": "PostNL Standard 0-23kg",
        "carrier": "postnl",
        "min_weight": "0.001",
        "max_weight": "23.001",
        "service_point_input": "none",
        "price": 0,
        "countries": [
            { "id": 1, "name": "Netherlands", "price": 3.5, "iso_2": "NL", "iso_3": "NLD" }
        ]
    })
}

#[test]
fn test_filter_serializes_only_set_fields() {
    let filter = ShippingMethodFilter::default()
        .with_sender_address(12)
        .returns();

    assert_eq!(
        serde_json::to_value(&filter).unwrap(),
        json!({ "sender_address": 12, "is_return": true })
    );
    assert_eq!(
        serde_json::to_value(ShippingMethodFilter::default()).unwrap(),
        json!({})
    );
}

#[tokio::test]
async fn test_get_shipping_methods_passes_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/shipping_methods"))
        .and(query_param("service_point_id", "55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipping_methods": [shipping_method_json(8), shipping_method_json(9)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = ShippingMethodFilter::default().with_service_point(55);
    let methods = test_client(&server)
        .get_shipping_methods(&filter)
        .await
        .unwrap();

    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].id(), 8);
    assert_eq!(methods[0].price_for_country("NL"), Some(350));
    assert_eq!(methods[1].maximum_weight(), 23001);
}

#[tokio::test]
async fn test_get_shipping_methods_fails_on_bad_entry() {
    let server = MockServer::start().await;
    let mut broken = shipping_method_json(9);
    broken["min_weight"] = json!("light");
    Mock::given(method("GET"))
        .and(path("/api/v2/shipping_methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipping_methods": [shipping_method_json(8), broken]
        })))
        .mount(&server)
        .await;

    let error = test_client(&server)
        .get_shipping_methods(&ShippingMethodFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::Mapping(MappingError::InvalidField { ref field, .. }) if field == "shipping_method.min_weight"
    ));
}

#[tokio::test]
async fn test_get_shipping_method() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/shipping_methods/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipping_method": shipping_method_json(8)
        })))
        .mount(&server)
        .await;

    let method = test_client(&server).get_shipping_method(8).await.unwrap();

    assert_eq!(method.name(), "PostNL Standard 0-23kg");
    assert!(!method.supports_service_points());
}

#[tokio::test]
async fn test_get_sender_addresses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/user/addresses/sender"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sender_addresses": [{
                "id": 92837,
                "company_name": "ACME",
                "contact_name": "Jane",
                "email": "",
                "telephone": "+31401234567",
                "street": "Stadhuisplein",
                "house_number": "10",
                "postal_box": "",
                "postal_code": "5611 EM",
                "city": "Eindhoven",
                "country": "NL"
            }]
        })))
        .mount(&server)
        .await;

    let senders = test_client(&server).get_sender_addresses().await.unwrap();

    assert_eq!(senders.len(), 1);
    assert_eq!(senders[0].id(), 92837);
    assert_eq!(senders[0].email(), None);
}
