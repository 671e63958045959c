//! Document wrapping and naming for uploads.

use chrono::{DateTime, Utc};

/// Well-known destination folder name. Resolved to a provider id on every
/// save; never cached across requests.
pub const FOLDER_NAME: &str = "Letters";

/// Wrap editor content as a minimal HTML document.
///
/// Raw newlines become line-break tags. No other escaping is performed:
/// `<` and `&` pass through verbatim, so a caller can embed arbitrary markup
/// in the uploaded document. Known looseness, kept as specified.
pub fn wrap_html(content: &str) -> String {
    format!(
        "<html><body><p>{}</p></body></html>",
        content.replace('\n', "<br>")
    )
}

/// Generate the upload file name from a timestamp.
///
/// Repeated saves produce distinct names rather than overwriting; there is
/// no idempotency key anywhere in the save path.
pub fn letter_name(now: DateTime<Utc>) -> String {
    format!("Letter_{}", now.timestamp_millis())
}
