//! Integration tests for sessions: loading, delayed resets and teardown.
//!
//! Tokio's clock is paused in these tests, so the two-second reset delay
//! elapses as soon as the runtime has nothing else to do.

use async_trait::async_trait;
use memory_game::{
    Session, SessionSettings, SessionUpdate, Transition,
    entities::{Character, CharacterId, GameStatus},
    loader::{LoadError, RosterSource, StaticRoster, errors},
};
use std::{sync::Arc, time::Duration};
use tokio::{sync::oneshot, time::Instant};

fn roster(n: u64) -> Vec<Character> {
    (1..=n)
        .map(|i| Character::new(i, &format!("character-{i}"), None))
        .collect()
}

fn settings() -> SessionSettings {
    SessionSettings {
        seed: Some(17),
        ..SessionSettings::default()
    }
}

async fn loaded_session(n: u64) -> Session {
    let mut session = Session::mount(Arc::new(StaticRoster::new(roster(n))), settings());
    let update = session.next_update().await;
    assert_eq!(update, Some(SessionUpdate::RosterLoaded { count: n as usize }));
    session
}

/// Fails every request with the given status
struct FailingRoster(u16);

#[async_trait]
impl RosterSource for FailingRoster {
    async fn fetch_roster(&self, _limit: usize) -> errors::Result<Vec<Character>> {
        Err(LoadError::Status { code: self.0 })
    }
}

/// Never answers; reports on `dropped` when its future is torn down
struct PendingRoster {
    dropped: std::sync::Mutex<Option<oneshot::Sender<()>>>,
}

#[async_trait]
impl RosterSource for PendingRoster {
    async fn fetch_roster(&self, _limit: usize) -> errors::Result<Vec<Character>> {
        let _guard = self.dropped.lock().unwrap().take();
        std::future::pending::<()>().await;
        Ok(Vec::new())
    }
}

struct PanickingRoster;

#[async_trait]
impl RosterSource for PanickingRoster {
    async fn fetch_roster(&self, _limit: usize) -> errors::Result<Vec<Character>> {
        panic!("listing exploded");
    }
}

// ============================================================================
// Loading
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_loading_then_board() {
    let mut session = Session::mount(Arc::new(StaticRoster::new(roster(10))), settings());
    assert!(session.is_loading());
    assert!(session.view().is_loading());

    let update = session.next_update().await;
    assert_eq!(update, Some(SessionUpdate::RosterLoaded { count: 8 }));
    assert!(!session.is_loading());
    assert_eq!(session.state().roster().len(), 8);
    assert_eq!(session.view().cards().len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_poll_picks_up_roster() {
    let mut session = Session::mount(Arc::new(StaticRoster::new(roster(3))), settings());

    let mut updates = Vec::new();
    while updates.is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
        updates = session.poll();
    }
    assert_eq!(updates, vec![SessionUpdate::RosterLoaded { count: 3 }]);
    assert!(session.poll().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_load_failure_leaves_empty_board() {
    let mut session = Session::mount(Arc::new(FailingRoster(503)), settings());

    let update = session.next_update().await;
    assert!(matches!(update, Some(SessionUpdate::LoadFailed(_))));
    assert!(!session.is_loading());
    assert!(session.view().cards().is_empty());
    assert!(!session.view().is_loading());
    assert!(session.notice().unwrap().contains("503"));

    // Nothing to click, nothing to restart into
    assert!(session.click_at(0).is_err());
    assert_eq!(session.state().status(), GameStatus::InProgress);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_loader_reported() {
    let mut session = Session::mount(Arc::new(PanickingRoster), settings());

    let mut updates = Vec::new();
    while updates.is_empty() {
        tokio::time::sleep(Duration::from_millis(10)).await;
        updates = session.poll();
    }
    assert!(matches!(updates.as_slice(), [SessionUpdate::LoadFailed(_)]));
    assert!(!session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_panicking_loader_wakes_waiter() {
    let mut session = Session::mount(Arc::new(PanickingRoster), settings());

    let update = session.next_update().await;
    assert!(matches!(update, Some(SessionUpdate::LoadFailed(_))));
    assert!(!session.is_loading());
    assert_eq!(session.notice(), Some(LoadError::Aborted.to_string().as_str()));
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_pending_load() {
    let (tx, rx) = oneshot::channel();
    let source = PendingRoster {
        dropped: std::sync::Mutex::new(Some(tx)),
    };
    let mut session = Session::mount(Arc::new(source), settings());
    assert!(session.restart().is_none(), "restart is a no-op while loading");
    tokio::time::sleep(Duration::from_millis(10)).await;

    drop(session);
    assert!(rx.await.is_err(), "loader future should be dropped");
}

// ============================================================================
// Rounds
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_win_resets_after_delay() {
    let mut session = loaded_session(3).await;

    for id in 1..=2 {
        let transition = session.click(CharacterId(id)).unwrap();
        assert!(matches!(transition, Transition::Advanced { .. }));
    }
    assert_eq!(session.click(CharacterId(3)).unwrap(), Transition::Won);
    assert_eq!(session.state().status().to_string(), "You Win");
    assert!(session.reset_pending());

    let started = Instant::now();
    let update = session.next_update().await;
    assert!(matches!(update, Some(SessionUpdate::RoundReset { .. })));
    assert!(started.elapsed() >= Duration::from_millis(2000));

    let state = session.state();
    assert!(state.clicked().is_empty());
    assert_eq!(state.scores().score, 0);
    assert_eq!(state.scores().best_score, 3);
    assert_eq!(state.status().to_string(), "");
    assert!(!session.reset_pending());
}

#[tokio::test(start_paused = true)]
async fn test_game_over_ignores_clicks_until_reset() {
    let mut session = loaded_session(2).await;

    session.click(CharacterId(1)).unwrap();
    assert_eq!(session.click(CharacterId(1)).unwrap(), Transition::GameOver);
    assert_eq!(session.state().status().to_string(), "Game is over");

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(session.poll().is_empty());
    assert_eq!(session.click(CharacterId(2)).unwrap(), Transition::Ignored);
    assert_eq!(session.state().scores().score, 1);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let updates = session.poll();
    assert!(matches!(updates.as_slice(), [SessionUpdate::RoundReset { .. }]));
    assert!(session.state().clicked().is_empty());
    assert_eq!(session.state().status(), GameStatus::InProgress);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_pending_reset() {
    let mut session = loaded_session(2).await;
    session.click(CharacterId(2)).unwrap();
    session.click(CharacterId(2)).unwrap();
    let round = session.state().round();
    assert!(session.reset_pending());

    let transition = session.restart();
    assert_eq!(transition, Some(Transition::Reset { round: round + 1 }));
    assert!(!session.reset_pending());

    // Start playing the new round; the cancelled reset must not wipe it
    session.click(CharacterId(1)).unwrap();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert!(session.poll().is_empty());
    assert_eq!(session.state().round(), round + 1);
    assert_eq!(session.state().scores().score, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_reset_is_dropped() {
    let mut session = loaded_session(2).await;
    session.click(CharacterId(2)).unwrap();
    session.click(CharacterId(2)).unwrap();
    let round = session.state().round();

    // Let the timer fire so its reset is already waiting in the inbox
    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(session.restart(), Some(Transition::Reset { round: round + 1 }));
    session.click(CharacterId(1)).unwrap();

    assert!(session.poll().is_empty());
    assert_eq!(session.state().round(), round + 1);
    assert_eq!(session.state().status(), GameStatus::InProgress);
    assert_eq!(session.state().scores().score, 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_reset_delay() {
    let settings = SessionSettings {
        reset_delay: Duration::from_millis(250),
        ..settings()
    };
    let mut session = Session::mount(Arc::new(StaticRoster::new(roster(1))), settings);
    session.next_update().await;

    assert_eq!(session.click_at(0).unwrap(), Transition::Won);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(session.poll().len(), 1);
    assert_eq!(session.state().status(), GameStatus::InProgress);
}
