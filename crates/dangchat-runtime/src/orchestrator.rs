//! SessionOrchestrator - the async shell around the pure transitions.
//!
//! Owns the state behind a lock, runs the effects the reducer asks for
//! (oracle fetches, profile persistence, event publication) and enforces
//! the concurrency model: each operation commits as one non-preemptible
//! handler, a fetch suspends only its own flow, and a settlement whose
//! attempt token was superseded is a no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use dangchat_core::{
    mode_spec, Mode, OracleGateway, ProfileArity, RecoveryScreen, SajuProfile, Screen,
};
use dangchat_stores::{AuthBus, AuthEvent, ProfileStore};

use crate::events::{SessionEvent, SessionEvents};
use crate::install_prompt::{InstallPromptError, InstallPromptHandle};
use crate::reducer::{self, SelectOutcome, SettleOutcome, SubmitOutcome, TransitionError};
use crate::state::SessionState;

/// Orchestrator policy knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Screen a failed fetch recovers to. Hub for the multi-mode app.
    pub recovery: RecoveryScreen,
    /// Capacity of the session event channel.
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recovery: RecoveryScreen::default(),
            event_capacity: 64,
        }
    }
}

/// The session & navigation orchestrator.
pub struct SessionOrchestrator {
    state: RwLock<SessionState>,
    gateway: Arc<dyn OracleGateway>,
    profile_store: Arc<dyn ProfileStore>,
    events: SessionEvents,
    attempts: AtomicU64,
    config: SessionConfig,
}

impl SessionOrchestrator {
    pub fn new(gateway: Arc<dyn OracleGateway>, profile_store: Arc<dyn ProfileStore>) -> Self {
        Self::with_config(gateway, profile_store, SessionConfig::default())
    }

    pub fn with_config(
        gateway: Arc<dyn OracleGateway>,
        profile_store: Arc<dyn ProfileStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: RwLock::new(SessionState::new()),
            gateway,
            profile_store,
            events: SessionEvents::new(config.event_capacity),
            attempts: AtomicU64::new(0),
            config,
        }
    }

    /// Subscribe to committed-state notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// A consistent copy of the whole state tuple.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn screen(&self) -> Screen {
        self.state.read().await.screen
    }

    /// WELCOME → HUB.
    pub async fn enter(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::enter(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// WELCOME | HUB → AUTH.
    pub async fn request_login(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::request_login(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// AUTH → HUB.
    pub async fn cancel_auth(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::cancel_auth(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// INPUT | PROFILE → HUB; AUTH → its entry screen.
    pub async fn back(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::back(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// HUB → PROFILE (or AUTH for guests).
    pub async fn open_profile(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::open_profile(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// PROFILE → HUB, persisting the edited profile for the identity.
    /// Persistence failure is logged and never blocks the transition.
    pub async fn save_profile(&self, profile: SajuProfile) -> Result<(), TransitionError> {
        let (screen, persist) = {
            let mut state = self.state.write().await;
            reducer::save_profile(&mut state, profile.clone())?;
            let persist = state.identity.as_ref().map(|i| i.id.clone());
            (state.screen, persist)
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        if let Some(identity_id) = persist {
            if let Err(error) = self.profile_store.put(&identity_id, &profile).await {
                warn!(identity = %identity_id, %error, "profile save failed");
            }
        }
        Ok(())
    }

    /// HUB → INPUT, or the returning-user shortcut straight into the fetch.
    /// Returns the screen the operation settled on.
    pub async fn select_mode(&self, mode: Mode) -> Result<Screen, TransitionError> {
        let outcome = {
            let mut state = self.state.write().await;
            reducer::select_mode(&mut state, mode)?
        };
        match outcome {
            SelectOutcome::RouteToInput => {
                self.events.publish(SessionEvent::ScreenChanged {
                    screen: Screen::Input,
                });
                Ok(Screen::Input)
            }
            SelectOutcome::Shortcut(profile) => {
                info!(%mode, "returning user, skipping input form");
                self.submit_profile(profile, None).await
            }
        }
    }

    /// Record the profile(s), issue the fetch for the active mode, and wait
    /// for its settlement. The await suspends only this flow: auth events
    /// and `reset` proceed while the fetch is outstanding.
    ///
    /// Returns the screen the attempt settled on (RESULT on success, the
    /// recovery screen on fetch failure - a failed fetch is policy, not an
    /// `Err`). On the create-profile flow (INPUT with no mode) the profile
    /// is stored and the hub returned to.
    pub async fn submit_profile(
        &self,
        profile: SajuProfile,
        partner: Option<SajuProfile>,
    ) -> Result<Screen, TransitionError> {
        let token = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        let (outcome, saved_for) = {
            let mut state = self.state.write().await;
            let outcome = reducer::begin_submit(&mut state, profile.clone(), partner, token)?;
            let saved_for = match outcome {
                SubmitOutcome::ProfileSaved => state.identity.as_ref().map(|i| i.id.clone()),
                _ => None,
            };
            (outcome, saved_for)
        };

        match outcome {
            SubmitOutcome::ProfileSaved => {
                self.events.publish(SessionEvent::ScreenChanged {
                    screen: Screen::Hub,
                });
                if let Some(identity_id) = saved_for {
                    if let Err(error) = self.profile_store.put(&identity_id, &profile).await {
                        warn!(identity = %identity_id, %error, "profile save failed");
                    }
                }
                Ok(Screen::Hub)
            }
            SubmitOutcome::Direct => {
                self.events.publish(SessionEvent::ScreenChanged {
                    screen: Screen::Result,
                });
                Ok(Screen::Result)
            }
            SubmitOutcome::Fetch(request) => {
                let mode = request.mode;
                self.events.publish(SessionEvent::ScreenChanged {
                    screen: Screen::Loading,
                });
                info!(%mode, token, "oracle fetch started");

                let fetched = self.gateway.fetch(request).await;
                let mut state = self.state.write().await;
                match fetched {
                    Ok(result) => match reducer::settle_success(&mut state, token, result) {
                        SettleOutcome::Committed(screen) => {
                            let persist = self.persist_candidate(&state, mode);
                            drop(state);
                            info!(%mode, token, "oracle fetch committed");
                            self.events.publish(SessionEvent::ScreenChanged { screen });
                            self.events.publish(SessionEvent::ResultReady { mode });
                            if let Some((identity_id, profile)) = persist {
                                self.spawn_persist(identity_id, profile);
                            }
                            Ok(screen)
                        }
                        SettleOutcome::Stale => {
                            debug!(%mode, token, "stale success settlement discarded");
                            Ok(state.screen)
                        }
                    },
                    Err(error) => {
                        let message = error.to_string();
                        warn!(%mode, token, %error, "oracle fetch failed");
                        match reducer::settle_failure(
                            &mut state,
                            token,
                            message.clone(),
                            self.config.recovery,
                        ) {
                            SettleOutcome::Committed(screen) => {
                                drop(state);
                                self.events
                                    .publish(SessionEvent::FetchFailed { mode, message });
                                self.events.publish(SessionEvent::ScreenChanged { screen });
                                Ok(screen)
                            }
                            SettleOutcome::Stale => {
                                debug!(%mode, token, "stale failure settlement discarded");
                                Ok(state.screen)
                            }
                        }
                    }
                }
            }
        }
    }

    /// RESULT | LOADING → HUB; clears results and disarms any outstanding
    /// attempt. Idempotent from the hub.
    pub async fn reset(&self) -> Result<(), TransitionError> {
        let screen = {
            let mut state = self.state.write().await;
            reducer::reset(&mut state)?;
            state.screen
        };
        self.events.publish(SessionEvent::ScreenChanged { screen });
        Ok(())
    }

    /// Clear the surfaced fetch-failure notice.
    pub async fn dismiss_notice(&self) {
        let mut state = self.state.write().await;
        reducer::dismiss_notice(&mut state);
    }

    /// Apply one auth notification under the precedence table.
    pub async fn handle_auth_event(&self, event: AuthEvent) {
        let (outcome, screen) = {
            let mut state = self.state.write().await;
            let outcome = reducer::apply_auth(&mut state, event);
            (outcome, state.screen)
        };
        debug!(action = ?outcome.action, %screen, "auth event applied");
        if outcome.screen_changed {
            self.events.publish(SessionEvent::ScreenChanged { screen });
        }
    }

    /// Subscribe to an auth bus and forward its events for the lifetime of
    /// the session. Lagged notifications are dropped with a warning; the
    /// provider re-delivers current state and the rules are idempotent.
    pub fn attach_auth(self: &Arc<Self>, bus: &dyn AuthBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => orchestrator.handle_auth_event(event).await,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "auth stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Record the browser's install-prompt handle (at most once).
    pub async fn capture_install_prompt(
        &self,
        handle: InstallPromptHandle,
    ) -> Result<(), InstallPromptError> {
        let mut state = self.state.write().await;
        state.install_prompt.capture(handle)
    }

    /// Take the install-prompt handle out; it can never be taken again.
    pub async fn consume_install_prompt(
        &self,
    ) -> Result<InstallPromptHandle, InstallPromptError> {
        let mut state = self.state.write().await;
        state.install_prompt.consume()
    }

    /// Fire-and-forget profile persistence after a successful single-profile
    /// fetch for a signed-in user.
    fn persist_candidate(
        &self,
        state: &SessionState,
        mode: Mode,
    ) -> Option<(String, SajuProfile)> {
        if mode_spec(mode).arity != ProfileArity::Single {
            return None;
        }
        match (&state.identity, &state.active_profile) {
            (Some(identity), Some(profile)) => Some((identity.id.clone(), profile.clone())),
            _ => None,
        }
    }

    fn spawn_persist(&self, identity_id: String, profile: SajuProfile) {
        let store = Arc::clone(&self.profile_store);
        tokio::spawn(async move {
            if let Err(error) = store.put(&identity_id, &profile).await {
                warn!(identity = %identity_id, %error, "profile persistence failed");
            }
        });
    }
}
