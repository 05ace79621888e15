//! Best-effort extraction of a lead from a loosely-shaped payload.
//!
//! The row-insert webhook does not guarantee a fixed shape: the new row may
//! arrive nested under `record`, under `new`, or as the top-level object.
//! Extraction is tolerant and substitutes fixed placeholders for missing
//! fields so message templates never render an empty slot. Validation
//! happens after extraction, not before.

use serde_json::Value;

use super::kinds::RecordKind;

/// Placeholder rendered for absent optional fields.
pub const PLACEHOLDER: &str = "—";

/// Placeholder rendered for an absent name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A normalized submission, ready for message templating.
///
/// Every field except `email` is guaranteed non-empty (placeholder
/// substituted). `email` is carried raw; a lead without a usable email is
/// never constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub kind: RecordKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub vehicle: String,
    pub package: String,
    pub date: String,
    pub time: String,
    pub message: String,
}

impl Lead {
    /// Whether the lead carries an actual phone number (not the placeholder).
    pub fn has_phone(&self) -> bool {
        self.phone != PLACEHOLDER
    }
}

/// Locate the actual row inside a webhook payload.
///
/// Resolution order: `record` key, then `new` key, then the payload itself.
fn unwrap_row(payload: &Value) -> &Value {
    payload
        .get("record")
        .filter(|v| v.is_object())
        .or_else(|| payload.get("new").filter(|v| v.is_object()))
        .unwrap_or(payload)
}

/// Trim a value, falling back to a placeholder when blank.
pub(crate) fn or_placeholder(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Extract a trimmed string field, falling back to a placeholder when the
/// field is missing, non-string, or blank.
fn field_or(row: &Value, key: &str, fallback: &str) -> String {
    match row.get(key).and_then(Value::as_str) {
        Some(s) => or_placeholder(s, fallback),
        None => fallback.to_string(),
    }
}

/// Normalize an untyped webhook payload into a [`Lead`].
///
/// Returns `None` when the row lacks a usable email, since every downstream
/// notification depends on it. The payload's `table` field, when present,
/// selects the record kind; the relay historically carried bookings, so
/// that is the default.
pub fn normalize(payload: &Value) -> Option<Lead> {
    let row = unwrap_row(payload);

    let email = row
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or("");
    if email.is_empty() {
        return None;
    }

    let kind = payload
        .get("table")
        .and_then(Value::as_str)
        .map(RecordKind::from_table)
        .unwrap_or(RecordKind::Booking);

    Some(Lead {
        kind,
        name: field_or(row, "name", UNKNOWN_NAME),
        email: email.to_string(),
        phone: field_or(row, "phone", PLACEHOLDER),
        vehicle: field_or(row, "vehicle", PLACEHOLDER),
        package: field_or(row, "package", PLACEHOLDER),
        date: field_or(row, "date", PLACEHOLDER),
        time: field_or(row, "time", PLACEHOLDER),
        message: field_or(row, "message", PLACEHOLDER),
    })
}
