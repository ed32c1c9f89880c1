use std::sync::{Mutex, PoisonError};

use jobscout_core::Alert;
use scout_logging::scout_info;
use serde_json::Value;

/// The single shared failure panel.
///
/// `show` replaces whatever is displayed; `hide` clears it and may be called
/// any number of times.
pub trait AlertSurface: Send + Sync {
    fn show(&self, body: &Value, url: &str);
    fn hide(&self);
}

/// In-memory alert panel; `None` means hidden.
#[derive(Debug, Default)]
pub struct AlertPanel {
    current: Mutex<Option<Alert>>,
}

impl AlertPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<Alert> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_visible(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl AlertSurface for AlertPanel {
    fn show(&self, body: &Value, url: &str) {
        let alert = Alert::new(body, url);
        scout_info!("Alert for {}: {}", alert.url, alert.body);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(alert);
    }

    fn hide(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}
