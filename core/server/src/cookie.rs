//! Session cookie handling.

use http::header::COOKIE;
use http::HeaderMap;

use letterbox_common::SessionId;

/// Name of the httpOnly session cookie.
pub const SESSION_COOKIE: &str = "letterbox_sid";

/// Extract the session id from a request's Cookie header, if present.
pub fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| SessionId::from_string(value))
}

/// Serialize the session cookie for a Set-Cookie header.
pub fn session_cookie(id: &str, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Serialize an expired session cookie, clearing it on the client.
pub fn clear_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
