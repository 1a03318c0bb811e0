//! Session cookie helpers
//!
//! The session token travels in an `HttpOnly`, `SameSite=Lax` cookie named
//! `token`. The `Secure` attribute is appended when configured for HTTPS
//! deployments. Cookie max-age matches the token TTL, so the cookie and
//! the token it carries expire together.

use axum::http::{header, HeaderMap};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Build the `Set-Cookie` value delivering a session token
pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{name}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}{secure}",
        name = SESSION_COOKIE,
        value = token,
        max_age = max_age_secs,
        secure = secure_attr,
    )
}

/// Build the `Set-Cookie` value clearing the session cookie
///
/// Clearing the cookie does not invalidate the token server-side; stateless
/// tokens remain valid until natural expiry.
pub fn build_clear_cookie(secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{name}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0{secure}",
        name = SESSION_COOKIE,
        secure = secure_attr,
    )
}

/// Extract the session cookie value from request headers
pub fn session_cookie_value(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in raw.split(';') {
        let trimmed = part.trim();
        let Some((name, value)) = trimmed.split_once('=') else {
            continue;
        };
        if name == SESSION_COOKIE {
            return Some(value.to_string());
        }
    }
    None
}
