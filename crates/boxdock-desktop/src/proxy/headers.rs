//! Header rewriting applied by the access proxy.

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONNECTION, CONTENT_LENGTH, HOST, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, TE, TRAILER,
    TRANSFER_ENCODING, UPGRADE, USER_AGENT,
};
use axum::http::Method;
use boxdock_core::access::{
    AccessCredentials, BROWSER_ACCEPT, BROWSER_USER_AGENT, CLIENT_ID_HEADER, CLIENT_SECRET_HEADER,
};
use once_cell::sync::Lazy;
use url::Url;

static CLIENT_ID: Lazy<HeaderName> =
    Lazy::new(|| HeaderName::from_bytes(CLIENT_ID_HEADER.as_bytes()).expect("valid header name"));
static CLIENT_SECRET: Lazy<HeaderName> = Lazy::new(|| {
    HeaderName::from_bytes(CLIENT_SECRET_HEADER.as_bytes()).expect("valid header name")
});
static KEEP_ALIVE: Lazy<HeaderName> = Lazy::new(|| HeaderName::from_static("keep-alive"));

/// Adds service-token and browser identity headers to an outgoing request.
///
/// CORS preflights pass through untouched so the edge answers them itself.
/// Browser identity headers are skipped for file URLs.
pub fn apply_request_headers(
    headers: &mut HeaderMap,
    credentials: &AccessCredentials,
    target: &Url,
    method: &Method,
) {
    if method == Method::OPTIONS {
        return;
    }
    match HeaderValue::from_str(&credentials.client_id) {
        Ok(value) => {
            headers.insert(CLIENT_ID.clone(), value);
        }
        Err(_) => tracing::warn!("client id is not a valid header value"),
    }
    match HeaderValue::from_str(&credentials.client_secret) {
        Ok(value) => {
            headers.insert(CLIENT_SECRET.clone(), value);
        }
        Err(_) => tracing::warn!("client secret is not a valid header value"),
    }
    if target.scheme() != "file" {
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    }
}

/// Relaxes CORS on an upstream response so the embedded page can call the
/// instance API from any origin the shell serves it under.
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

/// Removes hop-by-hop headers that must not be forwarded between the
/// webview and the upstream.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in [
        &CONNECTION,
        &*KEEP_ALIVE,
        &PROXY_AUTHENTICATE,
        &PROXY_AUTHORIZATION,
        &TE,
        &TRAILER,
        &TRANSFER_ENCODING,
        &UPGRADE,
        &HOST,
        &CONTENT_LENGTH,
    ] {
        headers.remove(name);
    }
}
