use serde_json::Value;

use crate::{ConnectionId, JobRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CheckEligibility,
    OpenStream { connection: ConnectionId },
    CloseStream { connection: ConnectionId },
    RenderJob(JobRecord),
    ShowAlert { body: Value, url: String },
    HideAlert,
}
