//! Desktop shell for a Homebox instance.
//!
//! A single webview window loads the configured instance (directly, or
//! through the local access proxy when service-token credentials are set),
//! with a tray icon, global shortcuts, and an injected page toolbar.
//! Closing or minimizing hides the window; the app only exits through an
//! explicit quit.

pub mod proxy;
pub mod reload;
pub mod shortcuts;
pub mod state;
pub mod tray;
pub mod window;

use boxdock_core::{adapter, Settings};
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, RunEvent, WindowEvent};
use tokio::sync::mpsc;
use url::Url;

use crate::proxy::ProxyEvent;
use crate::reload::{AUTH_RETRY_DELAY, CONNECT_RETRY_DELAY};
use crate::state::AppState;

pub fn run(settings: Settings) {
    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // A second launch just surfaces the existing window.
            window::show(app);
        }))
        .manage(AppState::new(settings))
        .setup(|app| {
            let handle = app.handle().clone();
            let state = app.state::<AppState>();

            let shell_url = if let Some(credentials) = state.settings.access.clone() {
                let (events_tx, events_rx) = mpsc::unbounded_channel();
                let addr = tauri::async_runtime::block_on(proxy::spawn(
                    state.settings.url.clone(),
                    credentials,
                    events_tx,
                ))?;
                spawn_proxy_event_loop(handle.clone(), events_rx);
                Url::parse(&format!("http://{addr}/"))?
            } else {
                spawn_startup_probe(handle.clone(), state.settings.url.clone());
                state.settings.url.clone()
            };

            window::create_main_window(app, &shell_url, &state.adapter)?;
            if let Err(error) = tray::setup_tray(app) {
                tracing::warn!(%error, "failed to set up tray icon");
            }
            if let Err(error) = shortcuts::register(app) {
                tracing::warn!(%error, "failed to set up global shortcuts");
            }
            Ok(())
        })
        .on_page_load(|webview, payload| {
            if let PageLoadEvent::Finished = payload.event() {
                tracing::debug!(url = %payload.url(), "page load finished");
                if let Err(error) = webview.eval(adapter::REFRESH_SCRIPT) {
                    tracing::warn!(%error, "failed to refresh page toolbar");
                }
            }
        })
        .on_window_event(|window, event| {
            if window.label() != window::MAIN_WINDOW {
                return;
            }
            match event {
                WindowEvent::CloseRequested { api, .. } => {
                    let app = window.app_handle();
                    if !app.state::<AppState>().is_quitting() {
                        api.prevent_close();
                        window::hide(app);
                    }
                }
                WindowEvent::Focused(false) => {
                    // Minimize is treated like close: tuck away to the tray.
                    let app = window.app_handle();
                    if window.is_minimized().unwrap_or(false)
                        && !app.state::<AppState>().is_quitting()
                    {
                        window::hide(app);
                    }
                }
                _ => {}
            }
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| match &event {
            RunEvent::ExitRequested { code, api, .. } => {
                // Ignore exits not triggered through request_quit, e.g. the
                // last window closing.
                if code.is_none() && !app.state::<AppState>().is_quitting() {
                    api.prevent_exit();
                }
            }
            // Dock click with no visible window.
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => window::show(app),
            _ => {}
        });
}

/// Marks the app as quitting, cancels any pending reload, releases the
/// global shortcuts, and exits.
pub(crate) fn request_quit(app: &AppHandle) {
    let state = app.state::<AppState>();
    state.set_quitting();
    state.reload.cancel();
    shortcuts::unregister_all(app);
    app.exit(0);
}

/// Translates proxy failures into delayed page reloads. A 403 retries
/// quickly (token propagation lag); an unreachable upstream waits longer.
fn spawn_proxy_event_loop(app: AppHandle, mut events: mpsc::UnboundedReceiver<ProxyEvent>) {
    tauri::async_runtime::spawn(async move {
        while let Some(event) = events.recv().await {
            let delay = match &event {
                ProxyEvent::AccessDenied { url } => {
                    tracing::warn!(%url, "access denied, scheduling reload");
                    AUTH_RETRY_DELAY
                }
                ProxyEvent::UpstreamUnreachable { error } => {
                    tracing::warn!(%error, "upstream unreachable, scheduling reload");
                    CONNECT_RETRY_DELAY
                }
            };
            let handle = app.clone();
            app.state::<AppState>()
                .reload
                .schedule(delay, move || window::reload(&handle));
        }
    });
}

/// In direct mode there is no proxy to observe failures, so probe the
/// instance once at startup and schedule a reload if it is unreachable.
fn spawn_startup_probe(app: AppHandle, url: Url) {
    tauri::async_runtime::spawn(async move {
        let client = reqwest::Client::new();
        match client.get(url.as_str()).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "startup probe succeeded");
            }
            Err(error) if error.is_connect() || error.is_timeout() => {
                tracing::warn!(%error, "instance unreachable, scheduling reload");
                let handle = app.clone();
                app.state::<AppState>()
                    .reload
                    .schedule(CONNECT_RETRY_DELAY, move || window::reload(&handle));
            }
            Err(error) => {
                tracing::warn!(%error, "startup probe failed");
            }
        }
    });
}
