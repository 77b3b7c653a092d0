//! # Request Handlers
//!
//! Axum request handlers for the checkout acceptance API.
//! Every validation failure, whatever its stage, is reported through the
//! same `{"code": "VALIDATION_ERROR", "errors": [...]}` envelope.

use axum::{body::Bytes, http::StatusCode, response::IntoResponse, Json};
use checkout_core::{
    validate_checkout, verify_total, CheckoutError, ErrorEnvelope, Rule, Violation,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Body returned when a checkout request passes both gates
#[derive(Debug, Serialize)]
pub struct CheckoutAccepted {
    pub ok: bool,
}

impl CheckoutAccepted {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for CheckoutAccepted {
    fn default() -> Self {
        Self::new()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Json<ErrorEnvelope>) {
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
    (status, Json(ErrorEnvelope::from(err)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-gate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate and accept a checkout request.
///
/// The body is decoded here rather than through the `Json` extractor so a
/// malformed body lands in the same envelope as every other validation
/// failure. Accepted requests get `{"ok": true}`; downstream processing
/// (charge, order create) hangs off this gate and is not implemented yet.
#[instrument(skip(body), fields(bytes = body.len()))]
pub async fn checkout(
    body: Bytes,
) -> Result<Json<CheckoutAccepted>, (StatusCode, Json<ErrorEnvelope>)> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Rejecting unparseable checkout body: {}", e);
            let violation = Violation::new(
                Vec::new(),
                Rule::InvalidJson {
                    detail: e.to_string(),
                },
            );
            return Err(checkout_error_to_response(CheckoutError::Schema(vec![
                violation,
            ])));
        }
    };

    let request = validate_checkout(&raw).map_err(|e| {
        warn!("Rejecting checkout: {}", e);
        checkout_error_to_response(e)
    })?;

    verify_total(&request).map_err(|e| {
        warn!("Rejecting checkout: {}", e);
        checkout_error_to_response(e)
    })?;

    info!(
        "Accepted checkout: {} line(s), {} unit(s), total {} cents",
        request.items.len(),
        request.item_count(),
        request.total_cents
    );

    Ok(Json(CheckoutAccepted::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        TestServer::new(create_router()).expect("router builds")
    }

    fn valid_payload() -> Value {
        json!({
            "items": [{"sku": "A1", "qty": 2, "price_cents": 500}],
            "address": {
                "line1": "123 Main St",
                "city": "Metropolis",
                "state": "NY",
                "zip": "10001",
                "country": "US"
            },
            "payment_token": "tok_abcdef123",
            "total_cents": 1000
        })
    }

    #[tokio::test]
    async fn test_accepts_valid_checkout() {
        let server = server();

        let response = server.post("/checkout").json(&valid_payload()).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_rejects_total_mismatch_with_single_entry() {
        let server = server();
        let mut payload = valid_payload();
        payload["total_cents"] = json!(999);

        let response = server.post("/checkout").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["type"], "total_mismatch");
        assert_eq!(body["errors"][0]["loc"], json!(["total_cents"]));
    }

    #[tokio::test]
    async fn test_rejects_string_qty_with_type_error() {
        let server = server();
        let mut payload = valid_payload();
        payload["items"][0]["qty"] = json!("2");

        let response = server.post("/checkout").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"][0]["type"], "invalid_type");
        assert_eq!(body["errors"][0]["loc"], json!(["items", 0, "qty"]));
        assert_eq!(body["errors"][0]["input"], json!("2"));
    }

    #[tokio::test]
    async fn test_rejects_missing_state() {
        let server = server();
        let mut payload = valid_payload();
        payload["address"].as_object_mut().unwrap().remove("state");

        let response = server.post("/checkout").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"][0]["type"], "missing");
        assert_eq!(body["errors"][0]["loc"], json!(["address", "state"]));
    }

    #[tokio::test]
    async fn test_rejects_unknown_field() {
        let server = server();
        let mut payload = valid_payload();
        payload["coupon"] = json!("SAVE10");

        let response = server.post("/checkout").json(&payload).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["errors"][0]["type"], "unknown_field");
        assert_eq!(body["errors"][0]["loc"], json!(["coupon"]));
    }

    #[tokio::test]
    async fn test_reports_every_violation_in_order() {
        let server = server();
        let mut payload = valid_payload();
        payload["items"][0]["qty"] = json!(0);
        payload["address"]["zip"] = json!("abc");
        payload["payment_token"] = json!("short");

        let response = server.post("/checkout").json(&payload).await;

        let body = response.json::<Value>();
        let locs: Vec<&Value> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| &e["loc"])
            .collect();
        assert_eq!(
            locs,
            vec![
                &json!(["items", 0, "qty"]),
                &json!(["address", "zip"]),
                &json!(["payment_token"])
            ]
        );
    }

    #[tokio::test]
    async fn test_same_invalid_request_gets_same_errors() {
        let server = server();
        let mut payload = valid_payload();
        payload["items"][0]["qty"] = json!("2");
        payload["address"]["country"] = json!("CA");

        let first = server.post("/checkout").json(&payload).await.json::<Value>();
        let second = server.post("/checkout").json(&payload).await.json::<Value>();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejects_malformed_json_body() {
        let server = server();

        let response = server.post("/checkout").bytes("{not json".into()).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"][0]["type"], "invalid_json");
    }

    #[tokio::test]
    async fn test_health() {
        let server = server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }
}
