//! Interactive setup wizard.
//!
//! Collects the Homebox URL and, when the instance sits behind Cloudflare
//! Access, a service-token credential pair. Nothing is written until every
//! required value has been collected and validated, so an aborted run
//! leaves any previous configuration untouched.

use anyhow::Result;
use boxdock_core::{AccessCredentials, BoxdockError, Settings};
use boxdock_core::settings::parse_instance_url;
use url::Url;

use crate::ui;

pub fn run() -> Result<()> {
    ui::header("boxdock setup");

    // A readable existing configuration seeds the prompt defaults.
    let existing = match Settings::load() {
        Ok(settings) => Some(settings),
        Err(BoxdockError::SettingsNotFound(_)) => None,
        Err(e) => {
            ui::info(&format!("existing settings ignored: {e}"));
            None
        }
    };

    let access_default = existing.as_ref().map(Settings::access_enabled).unwrap_or(false);
    let use_access = ui::confirm("Are you using Cloudflare Access?", access_default)?;

    let url = prompt_url(existing.as_ref().map(|s| s.url.as_str()))?;

    let access = if use_access {
        let id_default = existing
            .as_ref()
            .and_then(|s| s.access.as_ref())
            .map(|a| a.client_id.as_str());
        Some(prompt_credentials(id_default)?)
    } else {
        None
    };

    let settings = Settings::new(url, access);
    let path = settings.save()?;

    println!();
    ui::success(&format!("Configuration saved to {}", path.display()));
    ui::info(&format!("Homebox URL: {}", settings.url));
    ui::info(&format!(
        "Cloudflare Access: {}",
        if settings.access_enabled() { "enabled" } else { "disabled" }
    ));
    println!();
    println!("Launch the shell with: boxdock-desktop");
    Ok(())
}

fn prompt_url(default: Option<&str>) -> Result<Url> {
    loop {
        let raw = ui::input("Homebox URL (e.g. https://homebox.example.com)", default)?;
        match parse_instance_url(&raw) {
            Ok(url) => return Ok(url),
            Err(e) => ui::error(&e.to_string()),
        }
    }
}

fn prompt_credentials(id_default: Option<&str>) -> Result<AccessCredentials> {
    println!("Provide your Cloudflare Access service token:");
    let client_id = loop {
        let value = ui::input("Client ID", id_default)?;
        if value.trim().is_empty() {
            ui::error("Client ID is required for Cloudflare Access");
        } else {
            break value.trim().to_string();
        }
    };
    let client_secret = loop {
        let value = ui::password("Client Secret")?;
        if value.trim().is_empty() {
            ui::error("Client Secret is required for Cloudflare Access");
        } else {
            break value.trim().to_string();
        }
    };
    Ok(AccessCredentials {
        client_id,
        client_secret,
    })
}
