//! # Memory Game
//!
//! A card memory game: a roster of characters is fetched once, dealt as
//! shuffled cards, and the player scores by picking every card exactly once.
//! The board is reshuffled after each pick. Picking a card twice ends the
//! round; picking them all wins it. Either way a new round starts after a
//! short delay, and the best score is kept for the whole session.
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, shuffle, round state machine and view model
//! - [`loader`]: Roster source trait and the listing wire format
//! - [`session`]: Async orchestration of loading and delayed resets
//!
//! ## Example
//!
//! ```
//! use memory_game::{GameState, Transition, entities::Character};
//!
//! let roster = vec![
//!     Character::new(1, "Naruto Uzumaki", None),
//!     Character::new(2, "Sasuke Uchiha", None),
//! ];
//! let mut game = GameState::with_seed(roster, 42);
//! assert!(matches!(game.click_at(0), Ok(Transition::Advanced { score: 1 })));
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameError, GameEvent, GameState, GameView, Transition,
    constants::{self, DEFAULT_API_URL, DEFAULT_ROSTER_SIZE, RESET_DELAY},
    entities, shuffle, view,
};

/// Loading the character roster.
pub mod loader;
pub use loader::{LoadError, RosterSource};

/// Running sessions with background load and reset timers.
pub mod session;
pub use session::{Session, SessionSettings, SessionUpdate};
