//! Small cross-cutting helpers with no natural home in the domain layer.

use chrono::Local;

/// Returns the current local time as an ISO 8601 / RFC 3339 timestamp.
pub fn iso_timestamp() -> String {
    Local::now().to_rfc3339()
}
