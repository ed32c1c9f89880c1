use crate::ConnectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User pressed the start/stop control.
    ToggleClicked,
    /// The eligibility check finished. `allowed` is false when the gateway
    /// already surfaced the failure through the alert panel.
    EligibilityChecked { allowed: bool },
    /// One event delivered by the stream connection `connection`.
    StreamEvent {
        connection: ConnectionId,
        data: String,
    },
    /// The stream connection itself failed (as opposed to sending a message).
    StreamFailed {
        connection: ConnectionId,
        url: String,
        reason: String,
    },
    /// User closed the alert panel.
    AlertDismissed,
    /// The front-end is going away; tear everything down.
    Shutdown,
}
