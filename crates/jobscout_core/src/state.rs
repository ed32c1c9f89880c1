use crate::view_model::{SessionView, StatusIndicator};

pub type ConnectionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Eligibility check outstanding; no connection yet.
    Starting,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    active_connection: Option<ConnectionId>,
    last_connection: ConnectionId,
    rendered_jobs: usize,
    dropped_events: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn active_connection(&self) -> Option<ConnectionId> {
        self.active_connection
    }

    pub fn view(&self) -> SessionView {
        let running = self.session == SessionState::Running;
        SessionView {
            session: self.session,
            indicator: if running {
                StatusIndicator::Alive
            } else {
                StatusIndicator::Dead
            },
            toggle_label: if running {
                crate::STOP_LABEL
            } else {
                crate::START_LABEL
            },
            active_connection: self.active_connection,
            rendered_jobs: self.rendered_jobs,
            dropped_events: self.dropped_events,
        }
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_active(&self, connection: ConnectionId) -> bool {
        self.session == SessionState::Running && self.active_connection == Some(connection)
    }

    pub(crate) fn begin_check(&mut self) {
        self.session = SessionState::Starting;
        self.dirty = true;
    }

    /// Allocates a fresh connection id and enters `Running`.
    pub(crate) fn open_connection(&mut self) -> ConnectionId {
        self.last_connection += 1;
        let connection = self.last_connection;
        self.active_connection = Some(connection);
        self.session = SessionState::Running;
        self.dirty = true;
        connection
    }

    /// Returns to `Idle`, handing back the connection that must be closed.
    pub(crate) fn reset_to_idle(&mut self) -> Option<ConnectionId> {
        self.session = SessionState::Idle;
        self.dirty = true;
        self.active_connection.take()
    }

    pub(crate) fn record_rendered(&mut self) {
        self.rendered_jobs += 1;
        self.dirty = true;
    }

    pub(crate) fn record_dropped(&mut self) {
        self.dropped_events += 1;
        self.dirty = true;
    }
}
