//! System tray icon and menu.

use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::TrayIconBuilder;
#[cfg(not(target_os = "macos"))]
use tauri::tray::{MouseButton, TrayIconEvent};
use tauri::App;

use crate::window;

pub const TRAY_ID: &str = "boxdock-tray";

const TRAY_ICON: &[u8] = include_bytes!("../icons/icon.png");

pub fn setup_tray(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let show = MenuItem::with_id(app, "show", "Show Homebox", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;
    let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&show, &separator, &quit])?;

    let icon = load_icon()?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .menu(&menu)
        .tooltip("Homebox Desktop")
        .on_menu_event(|app, event| match event.id.as_ref() {
            "show" => window::show(app),
            "quit" => crate::request_quit(app),
            _ => {}
        });

    // Left click toggles the window; the menu stays on right click.
    #[cfg(not(target_os = "macos"))]
    {
        builder = builder
            .show_menu_on_left_click(false)
            .on_tray_icon_event(|tray, event| {
                if let TrayIconEvent::Click { button, .. } = event {
                    if button == MouseButton::Left {
                        window::toggle_visibility(tray.app_handle());
                    }
                }
            });
    }

    builder.build(app)?;
    Ok(())
}

fn load_icon() -> Result<tauri::image::Image<'static>, Box<dyn std::error::Error>> {
    let decoded = image::load_from_memory(TRAY_ICON)?.into_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(tauri::image::Image::new_owned(
        decoded.into_raw(),
        width,
        height,
    ))
}
