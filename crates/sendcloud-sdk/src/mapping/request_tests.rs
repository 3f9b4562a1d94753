//! Tests for outbound parcel request bodies.

use super::*;
use rust_decimal::Decimal;

fn recipient() -> Address {
    Address::new(
        "Jane Doe",
        "Stadhuisplein 10",
        "Eindhoven",
        "5611 EM",
        "NL",
        "jane@example.com",
    )
}

fn shipping_method() -> ShippingMethod {
    ShippingMethod::from_json(&json!({
        "id": 8,
        "name": "PostNL Standard 0-23kg",
        "carrier": "postnl",
        "min_weight": "0.001",
        "max_weight": "23.001",
        "service_point_input": "none",
        "countries": []
    }))
    .unwrap()
}

mod address_fields {
    use super::*;

    #[test]
    fn test_absent_optional_address_fields_are_empty_strings() {
        let body = ParcelRequest::new(recipient()).to_request_body().unwrap();

        assert_eq!(body["company_name"], json!(""));
        assert_eq!(body["address_2"], json!(""));
        assert_eq!(body["house_number"], json!(""));
        assert_eq!(body["telephone"], json!(""));
        assert_eq!(body["country_state"], json!(""));
    }

    #[test]
    fn test_present_address_fields_are_copied() {
        let address = recipient()
            .with_company_name("Acme")
            .with_house_number("10")
            .with_phone_number("+31612345678")
            .with_country_state_code("NL-NB");

        let body = ParcelRequest::new(address).to_request_body().unwrap();

        assert_eq!(body["name"], json!("Jane Doe"));
        assert_eq!(body["company_name"], json!("Acme"));
        assert_eq!(body["address"], json!("Stadhuisplein 10"));
        assert_eq!(body["house_number"], json!("10"));
        assert_eq!(body["city"], json!("Eindhoven"));
        assert_eq!(body["postal_code"], json!("5611 EM"));
        assert_eq!(body["country"], json!("NL"));
        assert_eq!(body["email"], json!("jane@example.com"));
        assert_eq!(body["telephone"], json!("+31612345678"));
        assert_eq!(body["country_state"], json!("NL-NB"));
    }

    #[test]
    fn test_unset_non_address_fields_are_omitted() {
        let body = ParcelRequest::new(recipient()).to_request_body().unwrap();
        let keys = body.as_object().unwrap();

        for key in [
            "id",
            "order_number",
            "weight",
            "shipment",
            "request_label",
            "sender_address",
            "customs_invoice_nr",
            "customs_shipment_type",
            "parcel_items",
            "to_service_point",
        ] {
            assert!(!keys.contains_key(key), "unexpected key {}", key);
        }
    }
}

mod weight {
    use super::*;

    #[test]
    fn test_weight_is_sent_as_kilogram_string() {
        let body = ParcelRequest::new(recipient())
            .with_weight(2486)
            .to_request_body()
            .unwrap();

        assert_eq!(body["weight"], json!("2.486"));
    }

    #[test]
    fn test_whole_kilograms_keep_three_decimals() {
        let body = ParcelRequest::new(recipient())
            .with_weight(1000)
            .to_request_body()
            .unwrap();

        assert_eq!(body["weight"], json!("1.000"));
    }

    #[test]
    fn test_zero_weight_is_omitted() {
        let body = ParcelRequest::new(recipient())
            .with_weight(0)
            .to_request_body()
            .unwrap();

        assert!(body.get("weight").is_none());
    }
}

mod references {
    use super::*;

    #[test]
    fn test_shipping_method_object_is_reduced_to_id() {
        let body = ParcelRequest::new(recipient())
            .with_shipping_method(shipping_method())
            .to_request_body()
            .unwrap();

        assert_eq!(body["shipment"], json!({ "id": 8 }));
    }

    #[test]
    fn test_shipping_method_id_is_used_directly() {
        let body = ParcelRequest::new(recipient())
            .with_shipping_method(42)
            .to_request_body()
            .unwrap();

        assert_eq!(body["shipment"], json!({ "id": 42 }));
    }

    #[test]
    fn test_shipping_method_ref_from_json_number() {
        let reference = ShippingMethodRef::try_from(&json!(8)).unwrap();

        assert_eq!(reference, ShippingMethodRef::Id(8));
    }

    #[test]
    fn test_shipping_method_ref_rejects_other_shapes() {
        for value in [json!("8"), json!(true), json!([8]), json!(-3)] {
            let error = ShippingMethodRef::try_from(&value).unwrap_err();
            assert!(
                matches!(error, MappingError::InvalidArgument { .. }),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_shipping_method_ref_rejects_malformed_object() {
        let error = ShippingMethodRef::try_from(&json!({ "name": "no id" })).unwrap_err();

        assert!(matches!(error, MappingError::InvalidArgument { .. }));
    }

    #[test]
    fn test_shipping_method_ref_from_id_only_object() {
        let reference = ShippingMethodRef::try_from(&json!({ "id": 8 })).unwrap();

        assert_eq!(reference, ShippingMethodRef::Id(8));
    }

    #[test]
    fn test_shipping_method_ref_from_full_object_keeps_method() {
        let value = json!({
            "id": 8,
            "name": "PostNL Standard 0-23kg",
            "carrier": "postnl",
            "min_weight": "0.001",
            "max_weight": "23.001",
            "service_point_input": "none",
            "countries": []
        });

        let reference = ShippingMethodRef::try_from(&value).unwrap();

        assert_eq!(reference, ShippingMethodRef::Method(shipping_method()));
        assert_eq!(reference.id(), 8);
    }

    #[test]
    fn test_partial_shipping_method_object_is_reduced_to_id() {
        let reference = ShippingMethodRef::try_from(&json!({ "id": 8, "name": "PostNL" })).unwrap();

        assert_eq!(reference, ShippingMethodRef::Id(8));
    }

    #[test]
    fn test_shipping_method_ref_rejects_non_numeric_object_id() {
        for value in [json!({ "id": "x" }), json!({ "id": 0 }), json!({ "id": null })] {
            let error = ShippingMethodRef::try_from(&value).unwrap_err();
            assert!(
                matches!(error, MappingError::InvalidArgument { .. }),
                "{} should be rejected",
                value
            );
        }
    }

    #[test]
    fn test_sender_ref_from_id_only_object() {
        let reference = SenderRef::try_from(&json!({ "id": 5 })).unwrap();

        assert_eq!(reference, SenderRef::Id(5));
    }

    #[test]
    fn test_sender_ref_rejects_non_numeric_object_id() {
        let error = SenderRef::try_from(&json!({ "id": "x" })).unwrap_err();

        assert!(matches!(error, MappingError::InvalidArgument { .. }));
    }

    #[test]
    fn test_sender_id_is_sent_as_sender_address() {
        let body = ParcelRequest::new(recipient())
            .with_sender(92837)
            .to_request_body()
            .unwrap();

        assert_eq!(body["sender_address"], json!(92837));
        assert!(body.get("from_name").is_none());
    }

    #[test]
    fn test_sender_ref_from_json_object_uses_its_id() {
        let reference = SenderRef::try_from(&json!({
            "id": 5,
            "street": "Stadhuisplein",
            "postal_code": "5611 EM",
            "city": "Eindhoven",
            "country": "NL"
        }))
        .unwrap();

        let body = ParcelRequest::new(recipient())
            .with_sender(reference)
            .to_request_body()
            .unwrap();

        assert_eq!(body["sender_address"], json!(5));
    }

    #[test]
    fn test_sender_ref_rejects_strings() {
        let error = SenderRef::try_from(&json!("warehouse")).unwrap_err();

        assert!(matches!(error, MappingError::InvalidArgument { .. }));
    }

    #[test]
    fn test_full_sender_address_fills_from_fields() {
        let sender = Address::new(
            "Warehouse",
            "Keizersgracht 1",
            "Amsterdam",
            "1015 CJ",
            "NL",
            "ops@acme.example",
        )
        .with_company_name("Acme");

        let body = ParcelRequest::new(recipient())
            .with_sender(sender)
            .to_request_body()
            .unwrap();

        assert!(body.get("sender_address").is_none());
        assert_eq!(body["from_name"], json!("Warehouse"));
        assert_eq!(body["from_company_name"], json!("Acme"));
        assert_eq!(body["from_address_1"], json!("Keizersgracht 1"));
        assert_eq!(body["from_address_2"], json!(""));
        assert_eq!(body["from_house_number"], json!(""));
        assert_eq!(body["from_city"], json!("Amsterdam"));
        assert_eq!(body["from_postal_code"], json!("1015 CJ"));
        assert_eq!(body["from_country"], json!("NL"));
        assert_eq!(body["from_telephone"], json!(""));
        assert_eq!(body["from_email"], json!("ops@acme.example"));
    }
}

mod labels {
    use super::*;

    #[test]
    fn test_request_label_disables_shipping_rules() {
        let body = ParcelRequest::new(recipient())
            .with_shipping_method(8)
            .with_request_label(true)
            .to_request_body()
            .unwrap();

        assert_eq!(body["request_label"], json!(true));
        assert_eq!(body["apply_shipping_rules"], json!(false));
    }

    #[test]
    fn test_request_label_requires_shipping_method() {
        let error = ParcelRequest::new(recipient())
            .with_request_label(true)
            .to_request_body()
            .unwrap_err();

        assert!(matches!(error, MappingError::InvalidArgument { .. }));
    }
}

mod customs {
    use super::*;

    #[test]
    fn test_customs_fields_and_items() {
        let items = vec![
            ParcelItem::new("Green tea", 2, 150, Decimal::new(1299, 2))
                .with_hs_code("090210")
                .with_origin_country_code("CN")
                .with_sku("TEA-01"),
            ParcelItem::new("Mug", 1, 1000, Decimal::new(5, 0)),
        ];

        let body = ParcelRequest::new(recipient())
            .with_customs_invoice_number("INV-7")
            .with_customs_shipment_type(CustomsShipmentType::CommercialGoods)
            .with_items(items)
            .to_request_body()
            .unwrap();

        assert_eq!(body["customs_invoice_nr"], json!("INV-7"));
        assert_eq!(body["customs_shipment_type"], json!(2));

        let first = &body["parcel_items"][0];
        assert_eq!(first["description"], json!("Green tea"));
        assert_eq!(first["quantity"], json!(2));
        assert_eq!(first["weight"], json!("0.150"));
        assert_eq!(first["value"], json!(12.99));
        assert_eq!(first["hs_code"], json!("090210"));
        assert_eq!(first["origin_country"], json!("CN"));
        assert_eq!(first["sku"], json!("TEA-01"));
        assert!(first.get("product_id").is_none());

        let second = &body["parcel_items"][1];
        assert_eq!(second["weight"], json!("1.000"));
        assert_eq!(second["value"], json!(5.0));
        assert!(second.get("hs_code").is_none());
    }
}

#[test]
fn test_update_fields() {
    let body = ParcelRequest::new(recipient())
        .with_parcel_id(1234)
        .with_service_point(55)
        .with_post_number("POST-1")
        .with_order_number("1042")
        .to_request_body()
        .unwrap();

    assert_eq!(body["id"], json!(1234));
    assert_eq!(body["to_service_point"], json!(55));
    assert_eq!(body["to_post_number"], json!("POST-1"));
    assert_eq!(body["order_number"], json!("1042"));
}
