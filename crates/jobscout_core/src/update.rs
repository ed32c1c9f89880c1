use scout_logging::{scout_debug, scout_info, scout_warn};
use serde_json::Value;

use crate::{AppState, Effect, Msg, SessionState, StreamMessage};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ToggleClicked => match state.session() {
            SessionState::Idle => {
                scout_info!("Start requested; checking eligibility");
                state.begin_check();
                vec![Effect::CheckEligibility]
            }
            SessionState::Starting => {
                scout_debug!("Toggle ignored while the eligibility check is outstanding");
                Vec::new()
            }
            SessionState::Running => {
                scout_info!("Stop requested by user");
                stop_session(&mut state)
            }
        },
        Msg::EligibilityChecked { allowed } => {
            if state.session() != SessionState::Starting {
                scout_debug!(
                    "Eligibility result ignored in state {:?}",
                    state.session()
                );
                return (state, Vec::new());
            }
            if allowed {
                let connection = state.open_connection();
                scout_info!("Eligibility confirmed; opening connection {}", connection);
                vec![Effect::OpenStream { connection }]
            } else {
                scout_info!("Eligibility refused; staying idle");
                state.reset_to_idle();
                Vec::new()
            }
        }
        Msg::StreamEvent { connection, data } => {
            if !state.is_active(connection) {
                scout_debug!("Dropping event from inactive connection {}", connection);
                return (state, Vec::new());
            }
            match StreamMessage::parse(&data) {
                StreamMessage::Job(job) => {
                    state.record_rendered();
                    vec![Effect::RenderJob(job)]
                }
                StreamMessage::End => {
                    scout_info!("Connection {} signalled end of stream", connection);
                    stop_session(&mut state)
                }
                StreamMessage::Malformed(reason) => {
                    scout_warn!(
                        "Dropping malformed payload on connection {}: {} (len={})",
                        connection,
                        reason,
                        data.len()
                    );
                    state.record_dropped();
                    Vec::new()
                }
            }
        }
        Msg::StreamFailed {
            connection,
            url,
            reason,
        } => {
            if !state.is_active(connection) {
                scout_debug!(
                    "Ignoring failure of inactive connection {}: {}",
                    connection,
                    reason
                );
                return (state, Vec::new());
            }
            scout_warn!("Connection {} failed: {}", connection, reason);
            let mut effects = stop_session(&mut state);
            effects.push(Effect::ShowAlert {
                body: Value::String(reason),
                url,
            });
            effects
        }
        Msg::AlertDismissed => vec![Effect::HideAlert],
        Msg::Shutdown => match state.session() {
            SessionState::Idle => Vec::new(),
            SessionState::Starting | SessionState::Running => stop_session(&mut state),
        },
    };

    (state, effects)
}

fn stop_session(state: &mut AppState) -> Vec<Effect> {
    match state.reset_to_idle() {
        Some(connection) => vec![Effect::CloseStream { connection }],
        None => Vec::new(),
    }
}
