//! Cancellable delayed reset.

use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};

use super::messages::SessionEvent;

/// At most one pending reset. Scheduling again or dropping the timer
/// cancels the previous one.
#[derive(Debug, Default)]
pub struct ResetTimer {
    handle: Option<JoinHandle<()>>,
}

impl ResetTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send [`SessionEvent::ResetElapsed`] for `round` after `delay`.
    pub fn schedule(
        &mut self,
        delay: Duration,
        round: u64,
        sender: mpsc::UnboundedSender<SessionEvent>,
    ) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = sender.send(SessionEvent::ResetElapsed { round });
        }));
    }

    /// Abort the pending reset. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Forget a reset that has already fired.
    pub fn clear(&mut self) {
        self.handle = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
