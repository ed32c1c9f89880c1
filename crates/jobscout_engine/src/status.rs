use std::sync::{Mutex, PoisonError};

use jobscout_core::SessionView;

/// Receives the status indicator and toggle label after every visible change.
pub trait StatusSurface: Send + Sync {
    fn update(&self, view: &SessionView);
}

/// Keeps the current view and every view it was handed, oldest first.
#[derive(Debug, Default)]
pub struct StatusBoard {
    history: Mutex<Vec<SessionView>>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SessionView {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<SessionView> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StatusSurface for StatusBoard {
    fn update(&self, view: &SessionView) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
    }
}
