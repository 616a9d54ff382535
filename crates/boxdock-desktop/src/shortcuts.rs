//! Global keyboard shortcuts.
//!
//! All four bindings are registered system-wide. Show/hide and quit act
//! unconditionally; reload and devtools only act while the shell window
//! has focus.

use std::str::FromStr;

use tauri::App;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::window;

pub const SHOW_HIDE: &str = "Alt+H";
pub const RELOAD: &str = "Alt+R";
pub const DEVTOOLS: &str = "Alt+D";
pub const QUIT: &str = "Alt+Q";

pub fn register(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let show_hide = Shortcut::from_str(SHOW_HIDE)?;
    let reload = Shortcut::from_str(RELOAD)?;
    let devtools = Shortcut::from_str(DEVTOOLS)?;
    let quit = Shortcut::from_str(QUIT)?;

    app.handle().plugin(
        tauri_plugin_global_shortcut::Builder::new()
            .with_handler(move |app, shortcut, event| {
                if event.state() != ShortcutState::Pressed {
                    return;
                }
                if shortcut == &show_hide {
                    window::toggle_visibility(app);
                } else if shortcut == &reload {
                    window::reload_if_focused(app);
                } else if shortcut == &devtools {
                    window::toggle_devtools_if_focused(app);
                } else if shortcut == &quit {
                    crate::request_quit(app);
                }
            })
            .build(),
    )?;

    let global_shortcut = app.global_shortcut();
    for binding in [SHOW_HIDE, RELOAD, DEVTOOLS, QUIT] {
        if let Err(error) = global_shortcut.register(Shortcut::from_str(binding)?) {
            tracing::warn!(%binding, %error, "failed to register global shortcut");
        }
    }
    Ok(())
}

pub fn unregister_all(app: &tauri::AppHandle) {
    if let Err(error) = app.global_shortcut().unregister_all() {
        tracing::warn!(%error, "failed to unregister global shortcuts");
    }
}
