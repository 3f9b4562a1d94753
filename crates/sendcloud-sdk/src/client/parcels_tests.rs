//! Tests for parcel operations.

use super::*;
use crate::client::tests::{parcel_json, test_client};
use crate::models::ParcelStatus;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recipient() -> Address {
    Address::new(
        "John Doe",
        "Stadhuisplein 10",
        "Eindhoven",
        "5611 EM",
        "NL",
        "john@doe.com",
    )
}

#[tokio::test]
async fn test_get_parcel_maps_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/parcels/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "parcel": parcel_json(&server.uri()) })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let parcel = test_client(&server).get_parcel(3).await.unwrap();

    assert_eq!(parcel.id(), 3);
    assert_eq!(parcel.weight(), 2486);
    assert_eq!(parcel.status(), ParcelStatus::ReadyToSend);
    assert_eq!(parcel.order_number(), Some("201900001"));
    assert_eq!(parcel.shipping_method_id(), Some(8));
    assert!(parcel.has_label());
}

#[tokio::test]
async fn test_create_parcel_posts_request_body() {
    let server = MockServer::start().await;
    let request = ParcelRequest::new(recipient())
        .with_order_number("201900001")
        .with_weight(2486)
        .with_shipping_method(8)
        .with_request_label(true);

    Mock::given(method("POST"))
        .and(path("/api/v2/parcels"))
        .and(body_json(json!({ "parcel": request.to_request_body().unwrap() })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "parcel": parcel_json(&server.uri()) })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let parcel = test_client(&server).create_parcel(&request).await.unwrap();

    assert_eq!(parcel.id(), 3);
}

#[tokio::test]
async fn test_create_parcel_rejects_label_without_method_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = ParcelRequest::new(recipient()).with_request_label(true);
    let error = test_client(&server).create_parcel(&request).await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::Mapping(MappingError::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn test_update_parcel_puts_address_with_id() {
    let server = MockServer::start().await;
    let address = recipient().with_company_name("Acme");
    let expected = ParcelRequest::new(address.clone())
        .with_parcel_id(3)
        .to_request_body()
        .unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v2/parcels"))
        .and(body_json(json!({ "parcel": expected })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "parcel": parcel_json(&server.uri()) })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let parcel = test_client(&server).update_parcel(3, address).await.unwrap();

    assert_eq!(parcel.id(), 3);
}

mod cancel {
    use super::*;

    #[tokio::test]
    async fn test_cancel_parcel_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/parcels/3/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "cancelled",
                "message": "Parcel has been cancelled"
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert!(test_client(&server).cancel_parcel(3).await.unwrap());
    }

    #[tokio::test]
    async fn test_cancel_parcel_refused_returns_false() {
        for status in [400, 410] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/v2/parcels/3/cancel"))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                    "status": "failed",
                    "message": "Shipped parcels, or parcels being shipped, can no longer be cancelled."
                })))
                .mount(&server)
                .await;

            assert!(
                !test_client(&server).cancel_parcel(3).await.unwrap(),
                "status {} should report false",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_cancel_parcel_server_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/parcels/3/cancel"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = test_client(&server).cancel_parcel(3).await.unwrap_err();

        assert_eq!(error.status(), Some(500));
    }
}

mod labels {
    use super::*;

    #[tokio::test]
    async fn test_get_label_pdf_downloads_requested_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/labels/normal_printer/3"))
            .and(header("accept", "application/pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let parcel = Parcel::from_json(&parcel_json(&server.uri())).unwrap();
        let pdf = test_client(&server)
            .get_label_pdf(&parcel, LabelFormat::A4BottomRight)
            .await
            .unwrap();

        assert_eq!(&pdf[..], b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_get_label_pdf_refuses_label_on_other_host() {
        let server = MockServer::start().await;
        let other = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .expect(0)
            .mount(&other)
            .await;

        let parcel = Parcel::from_json(&parcel_json(&other.uri())).unwrap();
        let error = test_client(&server)
            .get_label_pdf(&parcel, LabelFormat::A6)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApiError::Mapping(MappingError::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_label_pdf_without_label_is_invalid_argument() {
        let server = MockServer::start().await;
        let mut data = parcel_json(&server.uri());
        data.as_object_mut().unwrap().remove("label");
        let parcel = Parcel::from_json(&data).unwrap();

        let error = test_client(&server)
            .get_label_pdf(&parcel, LabelFormat::A6)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApiError::Mapping(MappingError::InvalidArgument { .. })
        ));
    }
}

mod return_portal {
    use super::*;

    #[tokio::test]
    async fn test_get_return_portal_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/parcels/3/return_portal_url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://acme.shipping-portal.com/rp/?action=start&hash=abc"
            })))
            .mount(&server)
            .await;

        let url = test_client(&server).get_return_portal_url(3).await.unwrap();

        assert_eq!(
            url.as_deref(),
            Some("https://acme.shipping-portal.com/rp/?action=start&hash=abc")
        );
    }

    #[tokio::test]
    async fn test_get_return_portal_url_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/parcels/3/return_portal_url"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "Not found." }
            })))
            .mount(&server)
            .await;

        let url = test_client(&server).get_return_portal_url(3).await.unwrap();

        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_get_return_portal_url_other_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/parcels/3/return_portal_url"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "code": 401, "message": "Invalid username/password." }
            })))
            .mount(&server)
            .await;

        let error = test_client(&server).get_return_portal_url(3).await.unwrap_err();

        assert_eq!(error.vendor_code(), Some(401));
    }
}
