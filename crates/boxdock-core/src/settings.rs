//! Settings persistence.
//!
//! Boxdock keeps its configuration in an env-style key/value file
//! (`boxdock.env` under the platform config directory), written by the
//! setup wizard and read once at shell startup:
//!
//! ```text
//! HOMEBOX_URL=https://homebox.example.com
//! CF_ACCESS_CLIENT_ID=...        (optional)
//! CF_ACCESS_CLIENT_SECRET=...    (optional)
//! ```
//!
//! The credential pair is all-or-nothing: its presence selects the
//! access-proxy pipeline stage at launch.

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::access::AccessCredentials;
use crate::error::{BoxdockError, Result};

pub const URL_KEY: &str = "HOMEBOX_URL";
pub const CLIENT_ID_KEY: &str = "CF_ACCESS_CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "CF_ACCESS_CLIENT_SECRET";

const SETTINGS_FILE: &str = "boxdock.env";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the wrapped Homebox instance.
    pub url: Url,
    /// Cloudflare Access credentials; `Some` enables the interception stage.
    pub access: Option<AccessCredentials>,
}

impl Settings {
    pub fn new(url: Url, access: Option<AccessCredentials>) -> Self {
        Self { url, access }
    }

    /// Default on-disk location: `<config_dir>/boxdock/boxdock.env`.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(BoxdockError::NoConfigDir)?;
        Ok(dir.join("boxdock").join(SETTINGS_FILE))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BoxdockError::SettingsNotFound(path.to_path_buf()));
        }

        let mut url = None;
        let mut client_id = None;
        let mut client_secret = None;
        let iter = dotenvy::from_path_iter(path).map_err(|source| BoxdockError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        for item in iter {
            let (key, value) = item.map_err(|source| BoxdockError::SettingsRead {
                path: path.to_path_buf(),
                source,
            })?;
            match key.as_str() {
                URL_KEY => url = Some(value),
                CLIENT_ID_KEY => client_id = Some(value),
                CLIENT_SECRET_KEY => client_secret = Some(value),
                _ => {}
            }
        }

        let url = url
            .filter(|value| !value.trim().is_empty())
            .ok_or(BoxdockError::MissingKey {
                path: path.to_path_buf(),
                key: URL_KEY,
            })?;
        let url = parse_instance_url(&url)?;
        let access = AccessCredentials::from_parts(client_id, client_secret)?;

        tracing::debug!(path = %path.display(), access = access.is_some(), "loaded settings");
        Ok(Self { url, access })
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the settings file atomically: the new content lands in a
    /// sibling temp file first and is renamed over the target, so a failed
    /// run leaves any previous file untouched.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = format!(
            "# Boxdock settings (managed by `boxdock setup`)\n{}={}\n",
            URL_KEY, self.url
        );
        if let Some(access) = &self.access {
            content.push_str(&format!(
                "{}={}\n{}={}\n",
                CLIENT_ID_KEY, access.client_id, CLIENT_SECRET_KEY, access.client_secret
            ));
        }

        let tmp = path.with_extension("env.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Whether the access-proxy stage is part of the launch pipeline.
    pub fn access_enabled(&self) -> bool {
        self.access.is_some()
    }
}

/// Validate a user-supplied instance URL: must parse and be http(s).
pub fn parse_instance_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed).map_err(|e| BoxdockError::InvalidUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BoxdockError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(access: bool) -> Settings {
        let creds = access.then(|| AccessCredentials {
            client_id: "abc123.access".into(),
            client_secret: "s3cret".into(),
        });
        Settings::new(Url::parse("https://homebox.example.com").unwrap(), creds)
    }

    #[test]
    fn save_and_load_round_trip_with_access() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");

        let settings = sample(true);
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();

        assert_eq!(loaded, settings);
        assert!(loaded.access_enabled());
    }

    #[test]
    fn save_and_load_round_trip_without_access() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");

        let settings = sample(false);
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();

        assert!(!loaded.access_enabled());
        assert_eq!(loaded.url.as_str(), "https://homebox.example.com/");
    }

    #[test]
    fn load_missing_file_is_a_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("nope.env")).unwrap_err();
        assert!(matches!(err, BoxdockError::SettingsNotFound(_)));
    }

    #[test]
    fn load_rejects_missing_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");
        fs::write(&path, "CF_ACCESS_CLIENT_ID=a\nCF_ACCESS_CLIENT_SECRET=b\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, BoxdockError::MissingKey { key: "HOMEBOX_URL", .. }));
    }

    #[test]
    fn load_rejects_half_configured_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");
        fs::write(
            &path,
            "HOMEBOX_URL=https://homebox.example.com\nCF_ACCESS_CLIENT_ID=a\n",
        )
        .unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, BoxdockError::IncompleteCredentials));
    }

    #[test]
    fn save_replaces_previous_file_in_one_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");

        sample(true).save_to(&path).unwrap();
        sample(false).save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(!loaded.access_enabled());
        // No temp file left behind.
        assert!(!path.with_extension("env.tmp").exists());
    }

    #[test]
    fn parse_instance_url_rejects_non_http_schemes() {
        assert!(parse_instance_url("ftp://homebox.example.com").is_err());
        assert!(parse_instance_url("not a url").is_err());
        assert!(parse_instance_url(" https://homebox.example.com ").is_ok());
    }

    #[test]
    fn load_ignores_comments_and_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxdock.env");
        fs::write(
            &path,
            "# comment\nHOMEBOX_URL=https://homebox.example.com\nUNRELATED=1\n",
        )
        .unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.access.is_none());
    }
}
