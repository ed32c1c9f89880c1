use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use jobscout_core::{JobRecord, SessionView};
use jobscout_engine::{
    AlertPanel, AlertSurface, JobList, JobRenderer, ListRenderer, StatusSurface,
};
use serde_json::Value;

use super::render::{alert_lines, entry_lines, status_line};

/// Prints the alert panel whenever it is shown or closed.
#[derive(Debug, Default)]
pub struct TerminalAlert {
    panel: AlertPanel,
}

impl TerminalAlert {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertSurface for TerminalAlert {
    fn show(&self, body: &Value, url: &str) {
        self.panel.show(body, url);
        for line in alert_lines(self.panel.snapshot().as_ref()) {
            println!("{}", line);
        }
    }

    fn hide(&self) {
        if !self.panel.is_visible() {
            return;
        }
        self.panel.hide();
        for line in alert_lines(None) {
            println!("{}", line);
        }
    }
}

/// Appends to the shared list and prints the new entry with its arrival time.
pub struct TerminalRenderer {
    list: Arc<JobList>,
    inner: ListRenderer,
}

impl TerminalRenderer {
    pub fn new(list: Arc<JobList>) -> Self {
        let inner = ListRenderer::new(&list);
        Self { list, inner }
    }
}

impl JobRenderer for TerminalRenderer {
    fn render(&self, job: &JobRecord) {
        self.inner.render(job);
        if let Some(entry) = self.list.last() {
            let received_at = Local::now().format("%H:%M:%S").to_string();
            for line in entry_lines(self.list.len(), &entry, &received_at) {
                println!("{}", line);
            }
        }
    }
}

/// Prints the status line when the session, indicator or label changes.
#[derive(Debug, Default)]
pub struct TerminalStatus {
    printed: Mutex<Option<SessionView>>,
}

impl TerminalStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSurface for TerminalStatus {
    fn update(&self, view: &SessionView) {
        let mut printed = self.printed.lock().unwrap_or_else(PoisonError::into_inner);
        let changed = printed.as_ref().map_or(true, |previous| {
            previous.session != view.session
                || previous.indicator != view.indicator
                || previous.toggle_label != view.toggle_label
        });
        if changed {
            println!("{}", status_line(view));
            *printed = Some(view.clone());
        }
    }
}
