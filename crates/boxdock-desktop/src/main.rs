#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use boxdock_core::Settings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boxdock_desktop=info,boxdock_core=info")),
        )
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(error) => {
            tracing::error!(%error, "cannot start without valid settings");
            eprintln!("{error}");
            eprintln!("Run `boxdock setup` to configure the shell.");
            std::process::exit(1);
        }
    };

    boxdock_desktop::run(settings);
}
