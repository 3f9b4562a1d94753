//! Tests for sender address mapping.

use super::*;
use serde_json::json;

fn sender_json() -> Value {
    json!({
        "id": 92837,
        "company_name": "ACME",
        "contact_name": "",
        "email": "shipping@acme.example",
        "telephone": "+31401234567",
        "street": "Stadhuisplein",
        "house_number": "10",
        "postal_box": "",
        "postal_code": "5611 EM",
        "city": "Eindhoven",
        "country": "NL"
    })
}

#[test]
fn test_from_json_maps_fields() {
    let sender = SenderAddress::from_json(&sender_json()).unwrap();

    assert_eq!(sender.id(), 92837);
    assert_eq!(sender.company_name(), Some("ACME"));
    assert_eq!(sender.contact_name(), None);
    assert_eq!(sender.postal_box(), None);
    assert_eq!(sender.house_number(), Some("10"));
    assert_eq!(sender.country_code(), "NL");
}

#[test]
fn test_display_line() {
    let sender = SenderAddress::from_json(&sender_json()).unwrap();

    assert_eq!(
        sender.display_line(),
        "ACME, Stadhuisplein 10, 5611 EM Eindhoven, NL"
    );
}

#[test]
fn test_from_json_requires_street() {
    let mut data = sender_json();
    data["street"] = Value::Null;

    assert_eq!(
        SenderAddress::from_json(&data).unwrap_err(),
        MappingError::missing("sender_address.street")
    );
}
