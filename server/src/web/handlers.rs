//! HTTP endpoint handlers.
//!
//! Three submission entry points plus a health check:
//! - `POST /inquiry` and `POST /booking` run the full pipeline
//!   (validate → persist → notify) within the request.
//! - `POST /webhook/new-record` relays the database's own row-insert event:
//!   it re-derives the record defensively and only notifies — the row is
//!   already persisted, that is what fired the webhook.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::notify::{dispatch, EmailSender, SmsSender};
use crate::store::RecordStore;
use crate::submit::{normalize, submit, RecordKind, Submission, SubmitDeps, SubmitError};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn RecordStore>,
    pub mailer: Option<Arc<dyn EmailSender>>,
    pub sms: Option<Arc<dyn SmsSender>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn RecordStore>,
        mailer: Option<Arc<dyn EmailSender>>,
        sms: Option<Arc<dyn SmsSender>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            mailer,
            sms,
        }
    }

    fn deps(&self) -> SubmitDeps<'_> {
        SubmitDeps {
            config: &self.config,
            store: self.store.as_ref(),
            email: self.mailer.as_deref(),
            sms: self.sms.as_deref(),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Direct Submissions
// =============================================================================

/// Response for the two form endpoints.
#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
}

/// Inquiry form endpoint.
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> Result<Json<SubmitResponse>, SubmitError> {
    info!(email = %submission.email, "inquiry_received");

    // SpamDropped intentionally responds as success.
    submit(&state.deps(), RecordKind::Inquiry, submission).await?;

    Ok(Json(SubmitResponse { success: true }))
}

/// Booking form endpoint.
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> Result<Json<SubmitResponse>, SubmitError> {
    info!(email = %submission.email, package = %submission.package, "booking_received");

    submit(&state.deps(), RecordKind::Booking, submission).await?;

    Ok(Json(SubmitResponse { success: true }))
}

// =============================================================================
// Row-Insert Webhook
// =============================================================================

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

/// Row-insert webhook endpoint.
///
/// This endpoint:
/// 1. Verifies the `x-shared-secret` header (if a secret is configured)
/// 2. Normalizes the loosely-shaped row payload
/// 3. Fans out notifications, best-effort
pub async fn webhook_new_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    // Verify the shared secret
    let provided = headers.get("x-shared-secret").and_then(|v| v.to_str().ok());
    let expected = state.config.webhook_shared_secret.as_deref();

    match (provided, expected) {
        (Some(got), Some(want)) if got == want => {
            // Auth passes
        }
        (None, Some(_)) => {
            warn!("webhook_secret_missing");
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    ok: false,
                    error: Some("bad signature"),
                }),
            );
        }
        (Some(_), Some(_)) => {
            warn!("webhook_secret_mismatch");
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    ok: false,
                    error: Some("bad signature"),
                }),
            );
        }
        (_, None) => {
            // No secret configured, allow through
            warn!("webhook_auth_not_configured");
        }
    }

    let Some(lead) = normalize(&payload) else {
        warn!("webhook_record_missing_email");
        return (
            StatusCode::BAD_REQUEST,
            Json(WebhookResponse {
                ok: false,
                error: Some("no email"),
            }),
        );
    };

    info!(kind = lead.kind.label(), to = %lead.email, "webhook_record_received");

    let report = dispatch(
        &state.config,
        state.mailer.as_deref(),
        state.sms.as_deref(),
        &lead,
    )
    .await;

    info!(
        kind = lead.kind.label(),
        sent = report.sent(),
        failed = report.failed(),
        "webhook_notifications_dispatched"
    );

    (
        StatusCode::OK,
        Json(WebhookResponse {
            ok: true,
            error: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_config, FailingStore, MemoryMailer, MemorySms, MemoryStore};
    use crate::web::router;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    struct Harness {
        store: Arc<MemoryStore>,
        mailer: Arc<MemoryMailer>,
        sms: Arc<MemorySms>,
        app: axum::Router,
    }

    fn harness_with(config: Config) -> Harness {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(MemoryMailer::default());
        let sms = Arc::new(MemorySms::default());
        let state = AppState {
            config: Arc::new(config),
            store: store.clone(),
            mailer: Some(mailer.clone()),
            sms: Some(sms.clone()),
        };
        Harness {
            store,
            mailer,
            sms,
            app: router(state),
        }
    }

    fn harness() -> Harness {
        harness_with(test_config())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();

        let response = h
            .app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_inquiry_success_path() {
        let h = harness();
        let body = json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "",
            "vehicle": "",
            "message": "Pet odor removal",
        });

        let response = h.app.oneshot(post_json("/inquiry", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "success": true }));

        let inserts = h.store.inserts.lock().unwrap();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].0, "inquiry_alerts");
        assert_eq!(inserts[0].1["phone"], "");

        let sent = h.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "jane@example.com");
        assert_eq!(sent[1].to, "owner@example.com");
    }

    #[tokio::test]
    async fn test_inquiry_invalid_email_is_rejected() {
        let h = harness();
        let body = json!({ "name": "Jane Doe", "email": "not-an-email", "message": "hi" });

        let response = h.app.oneshot(post_json("/inquiry", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
        assert!(h.store.inserts.lock().unwrap().is_empty());
        assert!(h.mailer.sent.lock().unwrap().is_empty());
        assert!(h.sms.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_honeypot_reads_as_success() {
        let h = harness();
        let body = json!({
            "email": "jane@example.com",
            "message": "hi",
            "company": "Acme Corp",
        });

        let response = h.app.oneshot(post_json("/inquiry", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "success": true }));
        assert!(h.store.inserts.lock().unwrap().is_empty());
        assert!(h.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_booking_success_path() {
        let h = harness();
        let body = json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+15551234567",
            "vehicle": "Honda CR-V",
            "package": "GOLD – SUV ($290)",
            "date": "2025-09-01",
            "time": "10:00",
        });

        let response = h.app.oneshot(post_json("/booking", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let inserts = h.store.inserts.lock().unwrap();
        assert_eq!(inserts[0].0, "bookings");
        assert_eq!(inserts[0].1["package"], "GOLD – SUV ($290)");

        // Phone present, so the SMS channel fires too.
        let texts = h.sms.sent.lock().unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].1, "+15551234567");
    }

    #[tokio::test]
    async fn test_booking_store_failure_returns_500() {
        let store = Arc::new(FailingStore);
        let mailer = Arc::new(MemoryMailer::default());
        let state = AppState {
            config: Arc::new(test_config()),
            store,
            mailer: Some(mailer.clone()),
            sms: None,
        };
        let app = router(state);
        let body = json!({ "email": "jane@example.com", "package": "SILVER" });

        let response = app.oneshot(post_json("/booking", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "failed to save booking");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_rejects_wrong_secret() {
        let h = harness();
        let request = Request::post("/webhook/new-record")
            .header("content-type", "application/json")
            .header("x-shared-secret", "wrong")
            .body(Body::from(
                serde_json::to_vec(&json!({ "record": { "email": "jane@example.com" } }))
                    .unwrap(),
            ))
            .unwrap();

        let response = h.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "ok": false, "error": "bad signature" })
        );
        assert!(h.mailer.sent.lock().unwrap().is_empty());
        assert!(h.sms.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_rejects_missing_secret_header() {
        let h = harness();
        let body = json!({ "record": { "email": "jane@example.com" } });

        let response = h
            .app
            .oneshot(post_json("/webhook/new-record", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(h.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_fail_open_when_secret_unconfigured() {
        let mut config = test_config();
        config.webhook_shared_secret = None;
        let h = harness_with(config);
        let body = json!({ "record": { "email": "jane@example.com" } });

        let response = h
            .app
            .oneshot(post_json("/webhook/new-record", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
        assert_eq!(h.mailer.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_webhook_requires_usable_email() {
        let h = harness();
        let request = Request::post("/webhook/new-record")
            .header("content-type", "application/json")
            .header("x-shared-secret", "s3cret")
            .body(Body::from(
                serde_json::to_vec(&json!({ "record": { "name": "Jane" } })).unwrap(),
            ))
            .unwrap();

        let response = h.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "ok": false, "error": "no email" })
        );
    }

    #[tokio::test]
    async fn test_webhook_notifies_without_persisting() {
        let h = harness();
        let request = Request::post("/webhook/new-record")
            .header("content-type", "application/json")
            .header("x-shared-secret", "s3cret")
            .body(Body::from(
                serde_json::to_vec(&json!({
                    "type": "INSERT",
                    "table": "bookings",
                    "record": {
                        "email": "jane@example.com",
                        "phone": "+15551234567",
                        "package": "GOLD – SUV ($290)",
                        "date": "2025-09-01",
                        "time": "10:00",
                    },
                }))
                .unwrap(),
            ))
            .unwrap();

        let response = h.app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
        // The relay never writes; the row that fired it is already stored.
        assert!(h.store.inserts.lock().unwrap().is_empty());
        assert_eq!(h.mailer.sent.lock().unwrap().len(), 2);
        assert_eq!(h.sms.sent.lock().unwrap().len(), 1);
    }
}
