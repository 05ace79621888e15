//! Message templates for the three channels.
//!
//! Bodies are small hand-built HTML fragments; every slot is filled from a
//! normalized lead, so none of them can render empty. Subjects and wording
//! differ per record kind.

use crate::submit::{Lead, RecordKind};

/// Subject line for the customer acknowledgment email.
pub fn customer_subject(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Booking => "We got your booking request ✔",
        RecordKind::Inquiry => "We got your message ✔",
    }
}

/// Body for the customer acknowledgment email.
pub fn customer_html(lead: &Lead) -> String {
    match lead.kind {
        RecordKind::Booking => format!(
            "<h2>Thanks for booking, {name}!</h2>\
             <p>Package: {package}</p>\
             <p>Date: {date} at {time}</p>\
             <p>We'll confirm shortly. Reply to this email with any questions.</p>",
            name = lead.name,
            package = lead.package,
            date = lead.date,
            time = lead.time,
        ),
        RecordKind::Inquiry => format!(
            "<h2>Thanks for reaching out, {name}!</h2>\
             <p>Your message: {message}</p>\
             <p>We'll reply shortly. Reply to this email with any questions.</p>",
            name = lead.name,
            message = lead.message,
        ),
    }
}

/// Subject line for the admin alert email.
pub fn admin_subject(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Booking => "New booking received",
        RecordKind::Inquiry => "New inquiry received",
    }
}

/// Body for the admin alert email. Carries every normalized field so the
/// owner never needs the database to see a new lead.
pub fn admin_html(lead: &Lead) -> String {
    let mut items = vec![
        format!("<li>Name: {}</li>", lead.name),
        format!("<li>Email: {}</li>", lead.email),
        format!("<li>Phone: {}</li>", lead.phone),
        format!("<li>Vehicle: {}</li>", lead.vehicle),
    ];

    match lead.kind {
        RecordKind::Booking => {
            items.push(format!("<li>Package: {}</li>", lead.package));
            items.push(format!("<li>Date: {} {}</li>", lead.date, lead.time));
        }
        RecordKind::Inquiry => {
            items.push(format!("<li>Message: {}</li>", lead.message));
        }
    }

    format!(
        "<h3>New {kind}</h3><ul>{items}</ul>",
        kind = lead.kind.label(),
        items = items.join(""),
    )
}

/// Short fixed-template SMS body.
pub fn sms_body(lead: &Lead) -> String {
    match lead.kind {
        RecordKind::Booking => format!(
            "AC Detailing: Booking received for {} {}. We'll confirm shortly.",
            lead.date, lead.time,
        ),
        RecordKind::Inquiry => {
            "AC Detailing: New inquiry received. We'll reply shortly.".to_string()
        }
    }
}
