//! Web server module for the form and webhook endpoints.
//!
//! This module provides the HTTP surface of the service:
//! - Receives the two form submissions from the site
//! - Receives the database's row-insert webhook
//! - Verifies the webhook shared secret
//! - Runs the submission pipeline and responds with a structured result

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;

pub use handlers::{
    health, submit_booking, submit_inquiry, webhook_new_record, AppState, HealthResponse,
    SubmitResponse, WebhookResponse,
};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/inquiry", post(submit_inquiry))
        .route("/booking", post(submit_booking))
        .route("/webhook/new-record", post(webhook_new_record))
        .with_state(state)
}
