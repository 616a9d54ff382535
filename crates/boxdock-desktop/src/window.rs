//! Main window creation and the handful of operations the tray and
//! shortcuts perform on it.

use boxdock_core::PageAdapter;
use tauri::{App, AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

pub const MAIN_WINDOW: &str = "main";

/// Builds the single shell window pointed at `shell_url` (the instance
/// itself, or the local access proxy in credential mode) with the page
/// toolbar injected before any site script runs.
pub fn create_main_window(
    app: &App,
    shell_url: &Url,
    adapter: &dyn PageAdapter,
) -> tauri::Result<WebviewWindow> {
    WebviewWindowBuilder::new(app, MAIN_WINDOW, WebviewUrl::External(shell_url.clone()))
        .title(adapter.window_title())
        .inner_size(1200.0, 800.0)
        .initialization_script(&adapter.toolbar_script())
        .build()
}

pub fn main_window(app: &AppHandle) -> Option<WebviewWindow> {
    app.get_webview_window(MAIN_WINDOW)
}

pub fn show(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        let _ = window.unminimize();
        let _ = window.show();
        let _ = window.set_focus();
    }
}

pub fn hide(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        let _ = window.hide();
    }
}

pub fn toggle_visibility(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        if window.is_visible().unwrap_or(false) {
            let _ = window.hide();
        } else {
            let _ = window.unminimize();
            let _ = window.show();
            let _ = window.set_focus();
        }
    }
}

pub fn reload(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        if let Err(error) = window.eval("window.location.reload();") {
            tracing::warn!(%error, "failed to reload page");
        }
    }
}

/// Reloads only when the window has focus, so the shortcut cannot yank a
/// page out from under another application.
pub fn reload_if_focused(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        if window.is_focused().unwrap_or(false) {
            let _ = window.eval("window.location.reload();");
        }
    }
}

pub fn toggle_devtools_if_focused(app: &AppHandle) {
    if let Some(window) = main_window(app) {
        if window.is_focused().unwrap_or(false) {
            if window.is_devtools_open() {
                window.close_devtools();
            } else {
                window.open_devtools();
            }
        }
    }
}
