//! Handler-level tests for the HTTP surface: origin enforcement, rate
//! limiting and validation failures. None of these paths reach the
//! network or the database, so the pool is lazy and the clients point at
//! unroutable addresses.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sky_brasil_api::app;
use sky_brasil_api::config::{ApiConfig, EfiPayConfig, EfiPayEnvironment, ResendConfig};
use sky_brasil_api::emails::Mailer;
use sky_brasil_api::services::{EfiPayClient, ResendClient};
use sky_brasil_api::state::AppState;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("postgres://postgres@127.0.0.1:1/test"),
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        efipay: EfiPayConfig {
            client_id: "Client_Id_test".to_string(),
            client_secret: SecretString::from("Client_Secret_test"),
            environment: EfiPayEnvironment::Sandbox,
        },
        resend: ResendConfig {
            api_key: SecretString::from("re_test_key"),
            from_address: "SKY BRASIL <contato@skybrasil.com.br>".to_string(),
            admin_email: "admin@skybrasil.com.br".to_string(),
        },
        allowed_origins: vec![
            "https://skybrasil.com.br".to_string(),
            "http://localhost:5173".to_string(),
        ],
        staging_origin_suffix: ".skybrasil.pages.dev".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

fn test_app() -> Router {
    test_app_with_processor("http://127.0.0.1:1")
}

fn test_app_with_processor(processor_url: &str) -> Router {
    let config = test_config();
    // Lazy pool: no connection is attempted until a query runs, and these
    // tests never run one.
    let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@127.0.0.1:1/test");
    let pool = pool.expect("lazy pool builds without connecting");

    let efipay = EfiPayClient::with_base_url(&config.efipay, processor_url);
    let resend = ResendClient::with_base_url(&config.resend, "http://127.0.0.1:1")
        .expect("client builds");
    let mailer = Mailer::new(resend, config.resend.admin_email.clone());

    app(AppState::with_clients(config, pool, efipay, mailer))
}

fn contact_request(origin: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "198.51.100.1");
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is json")
}

/// A syntactically valid contact body that fails validation (short
/// message), so the handler returns before touching the database.
fn invalid_contact_body() -> Value {
    json!({
        "name": "Ana Souza",
        "email": "ana@example.com",
        "message": "oi",
        "source": "contact",
    })
}

#[tokio::test]
async fn disallowed_origin_gets_403_before_validation() {
    let response = test_app()
        .oneshot(contact_request(
            Some("https://evil.example.com"),
            json!({"garbage": true}),
        ))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn allowed_origin_passes_origin_check() {
    let response = test_app()
        .oneshot(contact_request(
            Some("https://skybrasil.com.br"),
            invalid_contact_body(),
        ))
        .await
        .expect("app responds");

    // Past the origin check, the short message fails validation
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn staging_origin_passes_origin_check() {
    let response = test_app()
        .oneshot(contact_request(
            Some("https://preview-7.skybrasil.pages.dev"),
            invalid_contact_body(),
        ))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_origin_is_allowed() {
    let response = test_app()
        .oneshot(contact_request(None, invalid_contact_body()))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(false));
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("field errors present")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"message"));
}

#[tokio::test]
async fn preflight_answered_for_allowed_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/contact")
        .header(header::ORIGIN, "https://skybrasil.com.br")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .expect("request builds");

    let response = test_app().oneshot(request).await.expect("app responds");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://skybrasil.com.br")
    );
}

#[tokio::test]
async fn rate_limit_breach_returns_429() {
    let app = test_app();

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(contact_request(None, invalid_contact_body()))
            .await
            .expect("app responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = app
        .oneshot(contact_request(None, invalid_contact_body()))
        .await
        .expect("app responds");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = json_body(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn rate_limit_budget_replenishes_after_window() {
    let app = test_app();

    for _ in 0..10 {
        let _ = app
            .clone()
            .oneshot(contact_request(None, invalid_contact_body()))
            .await
            .expect("app responds");
    }
    let response = app
        .clone()
        .oneshot(contact_request(None, invalid_contact_body()))
        .await
        .expect("app responds");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // One token replenishes every 6 seconds
    tokio::time::sleep(std::time::Duration::from_millis(6500)).await;

    let response = app
        .oneshot(contact_request(None, invalid_contact_body()))
        .await
        .expect("app responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rate_limit_is_keyed_per_ip() {
    let app = test_app();

    // Exhaust the budget for one IP
    for _ in 0..10 {
        let _ = app
            .clone()
            .oneshot(contact_request(None, invalid_contact_body()))
            .await
            .expect("app responds");
    }

    // A different client is unaffected
    let mut request = contact_request(None, invalid_contact_body());
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.99".parse().expect("valid header"));
    let response = app.oneshot(request).await.expect("app responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

fn payment_request(items: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/payments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "payment_token": "tok_abc123",
                "customer": {
                    "name": "Ana Souza",
                    "email": "ana@example.com",
                    "cpf": "529.982.247-25",
                    "phone_number": "(11) 98765-4321",
                },
                "billing_address": {
                    "street": "Avenida Paulista",
                    "number": "1000",
                    "neighborhood": "Bela Vista",
                    "zipcode": "01310-100",
                    "city": "São Paulo",
                },
                "items": items,
            })
            .to_string(),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn payment_with_empty_items_rejected_before_any_network_call() {
    // The EfiPay client points at an unroutable address: if the relay
    // attempted a call, this test would fail with a gateway error
    // instead of a validation error.
    let response = test_app()
        .oneshot(payment_request(json!([])))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("field errors present")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"items"));
}

#[tokio::test]
async fn payment_response_total_is_computed_sum() {
    // The processor echoes a bogus total; the response must carry the
    // locally computed 2*100 + 1*50 = 250 centavos.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/authorize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token_xyz",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/charge/one-step"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "charge_id": 123_456,
                "status": "approved",
                "total": 999_999,
            },
        })))
        .mount(&server)
        .await;

    let response = test_app_with_processor(&server.uri())
        .oneshot(payment_request(json!([
            {"name": "Plano Start", "value": 100, "amount": 2},
            {"name": "Plano Plus", "value": 50, "amount": 1},
        ])))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["charge_id"], json!(123_456));
    assert_eq!(body["total"], json!(250));
}

#[tokio::test]
async fn vip_submission_requires_channel_and_platform() {
    let response = test_app()
        .oneshot(contact_request(
            None,
            json!({
                "name": "Ana Souza",
                "email": "ana@example.com",
                "message": "Quero participar do programa de agenciamento.",
                "source": "vip",
            }),
        ))
        .await
        .expect("app responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("field errors present")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"channel"));
    assert!(fields.contains(&"platform"));
}

#[tokio::test]
async fn health_endpoint_is_alive() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request builds");

    let response = test_app().oneshot(request).await.expect("app responds");
    assert_eq!(response.status(), StatusCode::OK);
}
