//! End-to-end tests for the site's REST API
//!
//! These tests drive the full router through axum-test, from HTTP request to
//! JSON response, with in-memory storage behind it.

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use wedding::pix::decode_payload;
use wedding::prelude::*;

fn cookware() -> Gift {
    Gift::new("Jogo de Panelas", Decimal::from(150))
}

fn create_test_server(gifts: Vec<Gift>, events: Vec<WeddingEvent>) -> TestServer {
    let app = ServerBuilder::new()
        .with_gifts(InMemoryDataService::with_rows(gifts))
        .with_events(InMemoryDataService::with_rows(events))
        .build()
        .expect("Failed to build app");

    TestServer::new(app).expect("Failed to create test server")
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server(vec![], vec![]);

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let extra = axum::Router::new().route(
            "/cerimonia",
            axum::routing::get(|| async { "Capela Nossa Senhora" }),
        );
        let app = ServerBuilder::new()
            .with_custom_routes(extra)
            .build()
            .expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/cerimonia").await;
        response.assert_status_ok();
        response.assert_text("Capela Nossa Senhora");

        server.get("/health").await.assert_status_ok();
    }
}

// =============================================================================
// Gift Tests
// =============================================================================

mod gift_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_gifts_by_price() {
        let server = create_test_server(
            vec![
                Gift::new("Geladeira", Decimal::from(3500)),
                cookware(),
                Gift::new("Toalhas", Decimal::new(8990, 2)),
            ],
            vec![],
        );

        let response = server.get("/gifts").await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        let names: Vec<_> = body.iter().map(|g| g["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Toalhas", "Jogo de Panelas", "Geladeira"]);
        assert_eq!(body[0]["price"], 89.9);
    }

    #[tokio::test]
    async fn test_gift_payment() {
        let gift = cookware();
        let server = create_test_server(vec![gift.clone()], vec![]);

        let response = server.get(&format!("/gifts/{}/payment", gift.id)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["amount"], "150.00");
        let payload = body["payload"].as_str().unwrap();
        assert!(payload.ends_with("6304A067"));

        let decoded = decode_payload(payload).unwrap();
        assert_eq!(decoded.description(), Some("Jogo de Panelas"));
    }

    #[tokio::test]
    async fn test_unknown_gift_is_404() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .get(&format!("/gifts/{}/payment", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let server = create_test_server(vec![], vec![]);

        let response = server.get("/gifts/not-a-uuid").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid UUID format: not-a-uuid");
    }

    #[tokio::test]
    async fn test_reserve_once() {
        let gift = cookware();
        let server = create_test_server(vec![gift.clone()], vec![]);
        let path = format!("/gifts/{}/reserve", gift.id);

        let response = server
            .post(&path)
            .json(&json!({ "buyer_name": "Tia Rosa" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["is_purchased"], true);
        assert_eq!(body["purchased_by"], "Tia Rosa");

        let response = server
            .post(&path)
            .json(&json!({ "buyer_name": "Primo Jorge" }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["code"], "GIFT_ALREADY_RESERVED");
    }

    #[tokio::test]
    async fn test_reserve_requires_buyer() {
        let gift = cookware();
        let server = create_test_server(vec![gift.clone()], vec![]);

        let response = server
            .post(&format!("/gifts/{}/reserve", gift.id))
            .json(&json!({ "buyer_name": "   " }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["details"]["fields"][0]["field"], "buyer_name");
    }

    #[tokio::test]
    async fn test_contribution() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/contributions")
            .json(&json!({ "amount": 75.5, "description": "Lua de mel" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let decoded = decode_payload(body["payload"].as_str().unwrap()).unwrap();
        assert_eq!(decoded.amount(), Some("75.50"));
    }
}

// =============================================================================
// RSVP Tests
// =============================================================================

mod rsvp_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_and_headcount() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/rsvps")
            .json(&json!({
                "guest_name": "Marina Souza",
                "email": "marina@example.com",
                "attending": true,
                "plus_ones": 2
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["rsvp"]["guest_name"], "Marina Souza");

        server
            .post("/rsvps")
            .json(&json!({ "guest_name": "Carlos", "attending": false }))
            .await
            .assert_status(StatusCode::CREATED);

        let body: Value = server.get("/rsvps/headcount").await.json();
        assert_eq!(body["headcount"], 3);
    }

    #[tokio::test]
    async fn test_invalid_form_lists_fields() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/rsvps")
            .json(&json!({
                "guest_name": "M",
                "email": "not-an-email",
                "attending": true,
                "plus_ones": 12
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/rsvps")
            .text("{ not json")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Gallery Tests
// =============================================================================

mod gallery_tests {
    use super::*;

    fn photo_form(name: &str, mime: &str, bytes: Vec<u8>) -> MultipartForm {
        MultipartForm::new()
            .add_text("name", name)
            .add_text("caption", "Os noivos")
            .add_part(
                "file",
                Part::bytes(bytes).file_name("foto.jpg").mime_type(mime),
            )
    }

    #[tokio::test]
    async fn test_upload_then_list_and_download() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/photos")
            .multipart(photo_form("Carla", "image/jpeg", vec![0xFF, 0xD8, 0xFF]))
            .await;
        response.assert_status(StatusCode::CREATED);

        let photo: Value = response.json();
        assert_eq!(photo["uploaded_by"], "Carla");
        assert_eq!(photo["caption"], "Os noivos");
        let url = photo["photo_url"].as_str().unwrap();
        let path = url.trim_start_matches("http://127.0.0.1:3000");
        assert!(path.starts_with("/files/wedding-photos/"));
        assert!(path.ends_with(".jpg"));

        let photos: Vec<Value> = server.get("/photos").await.json();
        assert_eq!(photos.len(), 1);

        let download = server.get(path).await;
        download.assert_status_ok();
        assert_eq!(download.as_bytes().as_ref(), &[0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let server = create_test_server(vec![], vec![]);

        let response = server
            .post("/photos")
            .multipart(photo_form("Carla", "text/plain", b"hello".to_vec()))
            .await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_rejects_oversized_image() {
        let mut config = SiteConfig::default_config();
        config.storage.max_upload_bytes = 4;
        let app = ServerBuilder::new().with_config(config).build().unwrap();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/photos")
            .multipart(photo_form("Carla", "image/png", vec![0; 16]))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unknown_file_is_404() {
        let server = create_test_server(vec![], vec![]);

        let response = server.get("/files/wedding-photos/missing.jpg").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Event Tests
// =============================================================================

mod event_tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_current_event() {
        let event = WeddingEvent::new(
            "Isabella",
            "Gabriel",
            Utc::now() + Duration::days(30),
            "Fazenda Boa Vista",
            "Rua das Flores, 100",
        );
        let server = create_test_server(vec![], vec![event]);

        let response = server.get("/event").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["event"]["venue_name"], "Fazenda Boa Vista");
        assert!(body["maps_url"].as_str().unwrap().contains("Rua%20das%20Flores"));
        assert!(body["countdown"]["days"].as_i64().unwrap() >= 29);
    }

    #[tokio::test]
    async fn test_no_event_is_404() {
        let server = create_test_server(vec![], vec![]);
        server.get("/event").await.assert_status(StatusCode::NOT_FOUND);
    }
}
