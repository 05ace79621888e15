//! Record kinds and submission validation.
//!
//! The two form kinds share one pipeline; this module holds the per-kind
//! descriptor (table name, label) and the minimal checks applied before
//! anything is persisted.

/// The two record kinds accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Free-form contact/quote request.
    Inquiry,
    /// Structured appointment request naming a package and preferred slot.
    Booking,
}

impl RecordKind {
    /// Backing table for this kind.
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Inquiry => "inquiry_alerts",
            RecordKind::Booking => "bookings",
        }
    }

    /// Short label used in logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Inquiry => "inquiry",
            RecordKind::Booking => "booking",
        }
    }

    /// Map a table name from a row-insert event back to a kind.
    ///
    /// Unknown tables fall back to Booking, which is what the relay
    /// historically carried.
    pub fn from_table(table: &str) -> RecordKind {
        if table == RecordKind::Inquiry.table() {
            RecordKind::Inquiry
        } else {
            RecordKind::Booking
        }
    }
}

/// Minimal email shape check: something before the `@`, and a domain with
/// a dot and a non-empty suffix, no whitespace anywhere. Deliverability is
/// the mail provider's problem; this only filters obvious junk before a
/// reply is attempted.
pub fn valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => match domain.rsplit_once('.') {
            Some((host, suffix)) => !host.is_empty() && !suffix.is_empty(),
            None => false,
        },
        _ => false,
    }
}

/// Honeypot check. The `company` field is hidden on both forms; humans
/// leave it empty, bots fill it in.
pub fn honeypot_tripped(company: &str) -> bool {
    !company.trim().is_empty()
}
