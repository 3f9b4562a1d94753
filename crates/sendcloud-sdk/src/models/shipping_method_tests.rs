//! Tests for shipping method mapping.

use super::*;
use serde_json::json;

fn shipping_method_json() -> Value {
    json!({
        "id": 8,
        "name": "PostNL Standard 0-23kg",
        "carrier": "postnl",
        "min_weight": "0.001",
        "max_weight": "23.001",
        "service_point_input": "none",
        "price": 0,
        "countries": [
            { "id": 1, "name": "Netherlands", "price": 3.50, "iso_2": "NL", "iso_3": "NLD" },
            { "id": 2, "name": "Belgium", "price": 4.20, "iso_2": "BE", "iso_3": "BEL" }
        ]
    })
}

#[test]
fn test_from_json_converts_weights_to_grams() {
    let method = ShippingMethod::from_json(&shipping_method_json()).unwrap();

    assert_eq!(method.id(), 8);
    assert_eq!(method.name(), "PostNL Standard 0-23kg");
    assert_eq!(method.carrier(), "postnl");
    assert_eq!(method.minimum_weight(), 1);
    assert_eq!(method.maximum_weight(), 23001);
}

#[test]
fn test_from_json_converts_prices_to_cents() {
    let method = ShippingMethod::from_json(&shipping_method_json()).unwrap();

    assert_eq!(method.price_for_country("NL"), Some(350));
    assert_eq!(method.price_for_country("BE"), Some(420));
    assert_eq!(method.price_for_country("DE"), None);
    assert_eq!(method.prices().len(), 2);
}

#[test]
fn test_service_point_support_follows_input_mode() {
    let method = ShippingMethod::from_json(&shipping_method_json()).unwrap();
    assert!(!method.supports_service_points());

    let mut data = shipping_method_json();
    data["service_point_input"] = json!("required");
    assert!(ShippingMethod::from_json(&data).unwrap().supports_service_points());

    data.as_object_mut().unwrap().remove("service_point_input");
    assert!(!ShippingMethod::from_json(&data).unwrap().supports_service_points());
}

#[test]
fn test_accepts_weight_is_inclusive() {
    let method = ShippingMethod::from_json(&shipping_method_json()).unwrap();

    assert!(method.accepts_weight(1));
    assert!(method.accepts_weight(23001));
    assert!(!method.accepts_weight(0));
    assert!(!method.accepts_weight(23002));
}

#[test]
fn test_from_json_fails_on_missing_country_price() {
    let mut data = shipping_method_json();
    data["countries"][1].as_object_mut().unwrap().remove("price");

    let error = ShippingMethod::from_json(&data).unwrap_err();

    assert_eq!(error, MappingError::missing("shipping_method.countries[1].price"));
}

#[test]
fn test_from_json_without_countries_has_no_prices() {
    let mut data = shipping_method_json();
    data["countries"] = json!(null);

    let method = ShippingMethod::from_json(&data).unwrap();

    assert!(method.prices().is_empty());
}
