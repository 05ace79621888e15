//! The submission pipeline: validate → persist → notify → respond.
//!
//! Both record kinds run through the same parameterized pipeline; the kind
//! descriptor supplies the table name and the message templates. Honeypot
//! hits are dropped silently (the response still reads as success so
//! automated submitters learn nothing). Persistence failures suppress
//! notifications; notification failures never fail the request.

pub mod kinds;
pub mod normalize;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::Config;
use crate::notify::{dispatch, DispatchReport, EmailSender, SmsSender};
use crate::store::RecordStore;

pub use kinds::{honeypot_tripped, valid_email, RecordKind};
pub use normalize::{normalize, Lead};

/// One form submission as posted by the site. Both forms deserialize into
/// this shape; fields the kind doesn't use stay empty and are not persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Honeypot. Hidden on the form; any non-empty value marks spam.
    #[serde(default)]
    pub company: String,
}

impl Submission {
    /// The row persisted for this kind, field values verbatim.
    pub fn row(&self, kind: RecordKind) -> Value {
        match kind {
            RecordKind::Inquiry => json!({
                "name": self.name,
                "email": self.email,
                "phone": self.phone,
                "vehicle": self.vehicle,
                "message": self.message,
            }),
            RecordKind::Booking => json!({
                "name": self.name,
                "email": self.email,
                "phone": self.phone,
                "vehicle": self.vehicle,
                "package": self.package,
                "date": self.date,
                "time": self.time,
            }),
        }
    }

    /// Normalize into a lead for message templating, with the same
    /// placeholder rules as the webhook path.
    pub fn into_lead(self, kind: RecordKind) -> Lead {
        use self::normalize::{or_placeholder, PLACEHOLDER, UNKNOWN_NAME};

        Lead {
            kind,
            name: or_placeholder(&self.name, UNKNOWN_NAME),
            email: self.email.trim().to_string(),
            phone: or_placeholder(&self.phone, PLACEHOLDER),
            vehicle: or_placeholder(&self.vehicle, PLACEHOLDER),
            package: or_placeholder(&self.package, PLACEHOLDER),
            date: or_placeholder(&self.date, PLACEHOLDER),
            time: or_placeholder(&self.time, PLACEHOLDER),
            message: or_placeholder(&self.message, PLACEHOLDER),
        }
    }
}

/// Collaborators the pipeline needs, injected per request from app state.
pub struct SubmitDeps<'a> {
    pub config: &'a Config,
    pub store: &'a dyn RecordStore,
    pub email: Option<&'a dyn EmailSender>,
    pub sms: Option<&'a dyn SmsSender>,
}

/// Pipeline result for an accepted request.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Row persisted; notification outcomes attached.
    Accepted(DispatchReport),
    /// Honeypot tripped. Nothing persisted, nothing sent.
    SpamDropped,
}

/// Request-terminal pipeline failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(&'static str),
    /// Store insert failed; detail stays in the server log.
    #[error("failed to save {0}")]
    Persistence(&'static str),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = match self {
            SubmitError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmitError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Run one submission through validate → persist → notify.
pub async fn submit(
    deps: &SubmitDeps<'_>,
    kind: RecordKind,
    submission: Submission,
) -> Result<SubmitOutcome, SubmitError> {
    if honeypot_tripped(&submission.company) {
        info!(kind = kind.label(), "honeypot_tripped");
        return Ok(SubmitOutcome::SpamDropped);
    }

    if !valid_email(&submission.email) {
        info!(kind = kind.label(), "submission_invalid_email");
        return Err(SubmitError::Validation("invalid email address"));
    }

    let row = submission.row(kind);
    if let Err(e) = deps.store.insert(kind.table(), &row).await {
        error!(error = %e, table = kind.table(), "record_insert_failed");
        return Err(SubmitError::Persistence(kind.label()));
    }
    info!(table = kind.table(), "record_inserted");

    let lead = submission.into_lead(kind);
    let report = dispatch(deps.config, deps.email, deps.sms, &lead).await;
    info!(
        kind = kind.label(),
        sent = report.sent(),
        failed = report.failed(),
        "notifications_dispatched"
    );

    Ok(SubmitOutcome::Accepted(report))
}
