//! Cloudflare Access credential model.
//!
//! A Homebox instance parked behind Cloudflare Access expects every request
//! to carry a service-token header pair. The desktop shell forwards these
//! through its interception stage; this module only models the pair and the
//! fixed header names.

use crate::error::{BoxdockError, Result};

/// Request header carrying the service-token client id.
pub const CLIENT_ID_HEADER: &str = "CF-Access-Client-Id";
/// Request header carrying the service-token client secret.
pub const CLIENT_SECRET_HEADER: &str = "CF-Access-Client-Secret";

/// Static browser-identifying overrides applied to non-local requests so the
/// edge sees an ordinary browser rather than an embedded webview.
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl AccessCredentials {
    /// Build from the two optional settings values. Both must be present and
    /// non-empty, or both absent; anything in between is a configuration
    /// error rather than a silently half-enabled mode.
    pub fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Option<Self>> {
        let client_id = client_id.filter(|v| !v.trim().is_empty());
        let client_secret = client_secret.filter(|v| !v.trim().is_empty());
        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Some(Self {
                client_id,
                client_secret,
            })),
            (None, None) => Ok(None),
            _ => Err(BoxdockError::IncompleteCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_requires_both_or_neither() {
        assert!(AccessCredentials::from_parts(None, None).unwrap().is_none());
        assert!(AccessCredentials::from_parts(Some("id".into()), Some("secret".into()))
            .unwrap()
            .is_some());
        assert!(AccessCredentials::from_parts(Some("id".into()), None).is_err());
        assert!(AccessCredentials::from_parts(None, Some("secret".into())).is_err());
    }

    #[test]
    fn from_parts_treats_blank_values_as_absent() {
        assert!(AccessCredentials::from_parts(Some("  ".into()), Some(String::new()))
            .unwrap()
            .is_none());
        assert!(AccessCredentials::from_parts(Some("id".into()), Some("  ".into())).is_err());
    }
}
