//! Messages between the session and its background tasks.

use std::fmt;

use crate::game::entities::Character;
use crate::loader::LoadError;

/// Sent to the session inbox by background tasks
#[derive(Debug)]
pub enum SessionEvent {
    /// The roster request finished
    RosterLoaded(Result<Vec<Character>, LoadError>),
    /// A scheduled reset is due for `round`
    ResetElapsed { round: u64 },
}

/// What the session did with an inbox event
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionUpdate {
    RosterLoaded { count: usize },
    LoadFailed(String),
    RoundReset { round: u64 },
}

impl fmt::Display for SessionUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterLoaded { count } => write!(f, "dealt {count} card(s)"),
            Self::LoadFailed(reason) => write!(f, "couldn't load characters: {reason}"),
            Self::RoundReset { round } => write!(f, "round {round} started"),
        }
    }
}
