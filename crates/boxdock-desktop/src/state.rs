//! Shared application state.

use std::sync::atomic::{AtomicBool, Ordering};

use boxdock_core::{HomeboxAdapter, Settings};

use crate::reload::ReloadScheduler;

pub struct AppState {
    pub settings: Settings,
    pub adapter: HomeboxAdapter,
    pub reload: ReloadScheduler,
    /// Set once the user asked to quit; close requests stop hiding the
    /// window and the exit is allowed through.
    quitting: AtomicBool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let adapter = HomeboxAdapter::new(settings.url.clone());
        Self {
            settings,
            adapter,
            reload: ReloadScheduler::new(),
            quitting: AtomicBool::new(false),
        }
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::SeqCst)
    }

    pub fn set_quitting(&self) {
        self.quitting.store(true, Ordering::SeqCst);
    }
}
