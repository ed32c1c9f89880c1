//! Jobscout core: pure streaming-ingestion state machine, data model and view-model helpers.
mod alert;
mod effect;
mod job;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use alert::{display_body, Alert, ErrorEnvelope};
pub use effect::Effect;
pub use job::JobRecord;
pub use message::StreamMessage;
pub use msg::Msg;
pub use state::{AppState, ConnectionId, SessionState};
pub use update::update;
pub use view_model::{
    EntryLink, EntrySection, JobEntry, SessionView, StatusIndicator, START_LABEL, STOP_LABEL,
};
