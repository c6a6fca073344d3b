//! A running game: roster load, state machine and reset timer on one owner.
//!
//! This module implements:
//! - `Session`: owns the [`GameState`] and every task that reports to it
//! - `ResetTimer`: the cancellable delay between a finished round and the next
//! - Message types exchanged over the session inbox
//!
//! ## Architecture
//!
//! Background tasks never touch game state. They hold a clone of the inbox
//! sender and report back with [`SessionEvent`]s, which the owner applies
//! from its own loop via [`Session::poll`] or [`Session::next_update`].
//! Dropping the session aborts the load and any pending reset.
//!
//! ## Example
//!
//! ```no_run
//! use memory_game::loader::StaticRoster;
//! use memory_game::session::{Session, SessionSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = Arc::new(StaticRoster::default());
//!     let mut session = Session::mount(source, SessionSettings::default());
//!     let _ = session.next_update().await;
//!     let _ = session.click_at(0);
//! }
//! ```

pub mod messages;
pub mod timer;

pub use messages::{SessionEvent, SessionUpdate};
pub use timer::ResetTimer;

use log::{debug, error, info};
use std::{sync::Arc, time::Duration};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::game::{
    GameError, GameEvent, GameState, GameView, Transition,
    constants::{DEFAULT_ROSTER_SIZE, RESET_DELAY},
    entities::CharacterId,
};
use crate::loader::{LoadError, RosterSource};

/// Tunables for a session
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionSettings {
    /// Characters taken from the listing
    pub roster_size: usize,
    /// Pause after a win or game over
    pub reset_delay: Duration,
    /// Fixed shuffle seed; random when `None`
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            roster_size: DEFAULT_ROSTER_SIZE,
            reset_delay: RESET_DELAY,
            seed: None,
        }
    }
}

pub struct Session {
    settings: SessionSettings,
    state: GameState,
    loading: bool,
    notice: Option<String>,
    sender: mpsc::UnboundedSender<SessionEvent>,
    inbox: mpsc::UnboundedReceiver<SessionEvent>,
    loader: Option<JoinHandle<()>>,
    reset_timer: ResetTimer,
}

impl Session {
    /// Start a session and spawn the roster request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(source: Arc<dyn RosterSource>, settings: SessionSettings) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();

        let state = match settings.seed {
            Some(seed) => GameState::with_seed(Vec::new(), seed),
            None => GameState::new(Vec::new()),
        };

        let limit = settings.roster_size;
        let tx = sender.clone();
        let loader = tokio::spawn(async move {
            let result = source.fetch_roster(limit).await;
            let _ = tx.send(SessionEvent::RosterLoaded(result));
        });

        Self {
            settings,
            state,
            loading: true,
            notice: None,
            sender,
            inbox,
            loader: Some(loader),
            reset_timer: ResetTimer::new(),
        }
    }

    /// Apply every event waiting in the inbox without blocking.
    pub fn poll(&mut self) -> Vec<SessionUpdate> {
        let loader_done = self
            .loader
            .as_ref()
            .is_some_and(|handle| handle.is_finished());

        let mut updates = Vec::new();
        while let Ok(event) = self.inbox.try_recv() {
            updates.extend(self.handle_event(event));
        }

        // The loader exited without sending a result
        if loader_done && self.loading {
            let aborted = SessionEvent::RosterLoaded(Err(LoadError::Aborted));
            updates.extend(self.handle_event(aborted));
        }

        updates
    }

    /// Wait for the next event that changes the session.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        loop {
            let event = match self.loader.as_mut() {
                Some(loader) => tokio::select! {
                    biased;
                    event = self.inbox.recv() => event?,
                    _ = loader => SessionEvent::RosterLoaded(Err(LoadError::Aborted)),
                },
                None => self.inbox.recv().await?,
            };
            if let Some(update) = self.handle_event(event) {
                return Some(update);
            }
        }
    }

    fn handle_event(&mut self, event: SessionEvent) -> Option<SessionUpdate> {
        match event {
            SessionEvent::RosterLoaded(result) => {
                self.loading = false;
                self.loader = None;
                match result {
                    Ok(roster) => {
                        let count = roster.len();
                        info!("Loaded {count} character(s)");
                        self.state.set_roster(roster);
                        Some(SessionUpdate::RosterLoaded { count })
                    }
                    Err(e) => {
                        error!("Error fetching characters: {e}");
                        self.notice = Some(e.to_string());
                        Some(SessionUpdate::LoadFailed(e.to_string()))
                    }
                }
            }
            SessionEvent::ResetElapsed { round } => {
                if round != self.state.round() || !self.state.status().is_terminal() {
                    debug!("Dropping stale reset for round {round}");
                    return None;
                }
                self.reset_timer.clear();
                match self.state.apply(GameEvent::Reset) {
                    Ok(Transition::Reset { round }) => Some(SessionUpdate::RoundReset { round }),
                    _ => None,
                }
            }
        }
    }

    fn schedule_reset(&mut self, transition: Transition) -> Transition {
        if transition.is_terminal() {
            self.reset_timer.schedule(
                self.settings.reset_delay,
                self.state.round(),
                self.sender.clone(),
            );
        }
        transition
    }

    /// Click the card at `index` of the current card order.
    ///
    /// A win or game over schedules the next round. Clicks made before
    /// that reset fires are ignored.
    pub fn click_at(&mut self, index: usize) -> Result<Transition, GameError> {
        let transition = self.state.click_at(index)?;
        Ok(self.schedule_reset(transition))
    }

    /// Click the card showing character `id`.
    pub fn click(&mut self, id: CharacterId) -> Result<Transition, GameError> {
        let transition = self.state.apply(GameEvent::Click(id))?;
        Ok(self.schedule_reset(transition))
    }

    /// Start a new round now, cancelling any pending reset.
    ///
    /// Does nothing while the roster is still loading.
    pub fn restart(&mut self) -> Option<Transition> {
        if self.loading {
            return None;
        }
        if self.reset_timer.cancel() {
            debug!("Cancelled pending reset for round {}", self.state.round());
        }
        self.state.apply(GameEvent::Reset).ok()
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state, self.loading, self.notice.as_deref())
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load failure message, if the roster request failed.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_timer.is_pending()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(loader) = self.loader.take() {
            loader.abort();
        }
        self.reset_timer.cancel();
    }
}
