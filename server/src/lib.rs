//! AC Detailing lead-capture backend.
//!
//! This library backs the `acdetail-web` binary: a small HTTP service that
//! accepts the site's two form submissions, persists each to the hosted
//! store, and fans out best-effort notifications.
//!
//! ## Pipeline
//!
//! ```text
//! Form POST → validate → persist → notify (customer email / admin email / SMS)
//! Row-insert webhook → verify secret → normalize → notify
//! ```

pub mod config;
pub mod notify;
pub mod store;
pub mod submit;
pub mod web;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::Config;
pub use notify::{dispatch, DispatchReport, EmailSender, ResendMailer, SmsSender, TwilioSms};
pub use store::{RecordStore, SupabaseStore};
pub use submit::{submit, Lead, RecordKind, Submission, SubmitError, SubmitOutcome};
pub use web::AppState;
