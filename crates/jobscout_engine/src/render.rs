use std::sync::{Arc, Mutex, PoisonError, Weak};

use jobscout_core::{JobEntry, JobRecord};
use scout_logging::scout_debug;

pub trait JobRenderer: Send + Sync {
    /// Appends one entry for `job`. Repeated records produce repeated entries.
    fn render(&self, job: &JobRecord);
}

/// Ordered, append-only list of rendered job entries.
#[derive(Debug, Default)]
pub struct JobList {
    entries: Mutex<Vec<JobEntry>>,
}

impl JobList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn entries(&self) -> Vec<JobEntry> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<JobEntry> {
        self.lock().last().cloned()
    }

    fn append(&self, entry: JobEntry) {
        self.lock().push(entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<JobEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Renders into a list it does not own; once the list is gone rendering is a no-op.
#[derive(Debug, Clone)]
pub struct ListRenderer {
    target: Weak<JobList>,
}

impl ListRenderer {
    pub fn new(target: &Arc<JobList>) -> Self {
        Self {
            target: Arc::downgrade(target),
        }
    }

    /// A renderer with no target list.
    pub fn detached() -> Self {
        Self {
            target: Weak::new(),
        }
    }
}

impl JobRenderer for ListRenderer {
    fn render(&self, job: &JobRecord) {
        let Some(list) = self.target.upgrade() else {
            scout_debug!("No job list attached; skipping '{}'", job.title);
            return;
        };
        list.append(JobEntry::from_record(job));
    }
}
