use std::sync::Arc;

use jobscout_core::{update, AppState, Effect, Msg, SessionState, SessionView};
use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};
use tokio::sync::mpsc;

use crate::{AlertSurface, Connection, Endpoints, JobRenderer, RequestGateway, StatusSurface, StreamConnector};

/// Presentation surfaces the controller drives.
#[derive(Clone)]
pub struct Surfaces {
    pub alert: Arc<dyn AlertSurface>,
    pub renderer: Arc<dyn JobRenderer>,
    pub status: Arc<dyn StatusSurface>,
}

/// Cheap sender for user intents; usable from any thread.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Msg>,
}

impl ControllerHandle {
    /// Returns false once the controller is gone.
    pub fn send(&self, msg: Msg) -> bool {
        self.tx.send(msg).is_ok()
    }

    pub fn toggle(&self) -> bool {
        self.send(Msg::ToggleClicked)
    }

    pub fn dismiss_alert(&self) -> bool {
        self.send(Msg::AlertDismissed)
    }

    pub fn shutdown(&self) -> bool {
        self.send(Msg::Shutdown)
    }
}

/// Owns the session state and the one live connection, and applies the
/// effects `update` asks for.
///
/// Every state change happens inside [`StreamController::dispatch`]; spawned
/// work (the eligibility check, connection readers) only posts messages back
/// into the controller's inbox.
pub struct StreamController {
    state: AppState,
    endpoints: Endpoints,
    gateway: Arc<dyn RequestGateway>,
    connector: Arc<dyn StreamConnector>,
    surfaces: Surfaces,
    connection: Option<Connection>,
    inbox_tx: mpsc::UnboundedSender<Msg>,
    inbox_rx: mpsc::UnboundedReceiver<Msg>,
    shut_down: bool,
}

impl StreamController {
    pub fn new(
        endpoints: Endpoints,
        gateway: Arc<dyn RequestGateway>,
        connector: Arc<dyn StreamConnector>,
        surfaces: Surfaces,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let state = AppState::new();
        surfaces.status.update(&state.view());
        Self {
            state,
            endpoints,
            gateway,
            connector,
            surfaces,
            connection: None,
            inbox_tx,
            inbox_rx,
            shut_down: false,
        }
    }

    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            tx: self.inbox_tx.clone(),
        }
    }

    pub fn session(&self) -> SessionState {
        self.state.session()
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Same as dispatching [`Msg::ToggleClicked`]; needs a tokio runtime.
    pub fn toggle(&mut self) {
        self.dispatch(Msg::ToggleClicked);
    }

    /// Applies one message synchronously, including its effects.
    ///
    /// Must be called from within a tokio runtime: starting a check or a
    /// connection spawns a task.
    pub fn dispatch(&mut self, msg: Msg) {
        if msg == Msg::Shutdown {
            self.shut_down = true;
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            self.apply(effect);
        }

        if self.state.consume_dirty() {
            self.surfaces.status.update(&self.state.view());
        }
    }

    /// Waits for the next inbound message and applies it. Returns false after shutdown.
    pub async fn next(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        match self.inbox_rx.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                !self.shut_down
            }
            None => false,
        }
    }

    /// Applies every message already waiting in the inbox; returns how many.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.inbox_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    pub async fn run(mut self) {
        scout_info!(
            "Controller running (check={}, stream={})",
            self.endpoints.check_url,
            self.endpoints.stream_url
        );
        while self.next().await {}
        scout_info!("Controller stopped");
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::CheckEligibility => self.spawn_eligibility_check(),
            Effect::OpenStream { connection } => {
                if let Some(stale) = self.connection.take() {
                    scout_error!(
                        "Connection {} still live while opening {}; closing it",
                        stale.id(),
                        connection
                    );
                    stale.close();
                }
                scout_info!(
                    "Opening connection {} to {}",
                    connection,
                    self.endpoints.stream_url
                );
                let live = self.connector.open(
                    connection,
                    &self.endpoints.stream_url,
                    self.inbox_tx.clone(),
                );
                self.connection = Some(live);
            }
            Effect::CloseStream { connection } => match self.connection.take() {
                Some(live) => {
                    if live.id() != connection {
                        scout_error!(
                            "Asked to close connection {} but {} is live; closing it",
                            connection,
                            live.id()
                        );
                    }
                    live.close();
                }
                None => scout_debug!("Connection {} already released", connection),
            },
            Effect::RenderJob(job) => self.surfaces.renderer.render(&job),
            Effect::ShowAlert { body, url } => self.surfaces.alert.show(&body, &url),
            Effect::HideAlert => self.surfaces.alert.hide(),
        }
    }

    fn spawn_eligibility_check(&self) {
        let gateway = Arc::clone(&self.gateway);
        let url = self.endpoints.check_url.clone();
        let inbox = self.inbox_tx.clone();
        tokio::spawn(async move {
            let allowed = match gateway.send_request(&url, None).await {
                Ok(response) => {
                    scout_debug!("Eligibility check answered {}", response.status());
                    true
                }
                Err(err) => {
                    scout_warn!("Eligibility check failed: {}", err);
                    false
                }
            };
            let _ = inbox.send(Msg::EligibilityChecked { allowed });
        });
    }
}
