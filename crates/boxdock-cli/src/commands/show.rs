//! Print the current configuration with the secret redacted.

use anyhow::Result;
use boxdock_core::Settings;

use crate::ui;

pub fn run() -> Result<()> {
    let settings = Settings::load()?;
    let path = Settings::default_path()?;

    ui::header("boxdock configuration");
    ui::info(&format!("Settings file: {}", path.display()));
    ui::info(&format!("Homebox URL: {}", settings.url));
    match &settings.access {
        Some(access) => {
            ui::info("Cloudflare Access: enabled");
            ui::info(&format!("Client ID: {}", access.client_id));
            ui::info(&format!("Client Secret: {}", redact(&access.client_secret)));
        }
        None => ui::info("Cloudflare Access: disabled"),
    }
    Ok(())
}

/// Show only the last four characters of a secret.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_keeps_only_the_tail() {
        assert_eq!(redact("supersecretvalue"), "****alue");
        assert_eq!(redact("abcd"), "****");
        assert_eq!(redact(""), "****");
    }
}
