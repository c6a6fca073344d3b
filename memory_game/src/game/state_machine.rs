//! Round state and click handling.
//!
//! All mutable game state lives in [`GameState`] and changes only through
//! [`GameState::apply`]. Timers are not handled here: a terminal transition
//! tells the caller to schedule a [`GameEvent::Reset`].

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;

use super::entities::{Character, CharacterId, ClickedSet, GameStatus, ScoreBoard};
use super::shuffle::shuffled;

/// Errors that can occur while handling a click
#[derive(Debug, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("no card at position {index} ({count} cards dealt)")]
    NoSuchCard { index: usize, count: usize },
    #[error("character {0} is not in the roster")]
    UnknownCharacter(CharacterId),
}

/// Inputs to the state machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameEvent {
    Click(CharacterId),
    Reset,
}

/// Result of applying a [`GameEvent`]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Transition {
    /// A new card was clicked and the board was reshuffled.
    Advanced { score: usize },
    /// Every card was clicked once. A reset should be scheduled.
    Won,
    /// A card was clicked twice. A reset should be scheduled.
    GameOver,
    /// The round already ended; the click changed nothing.
    Ignored,
    /// A new round started.
    Reset { round: u64 },
}

impl Transition {
    /// Whether this transition ended the round.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::GameOver)
    }
}

/// Complete game state for one session.
pub struct GameState {
    roster: Vec<Character>,
    cards: Vec<Character>,
    clicked: ClickedSet,
    scores: ScoreBoard,
    status: GameStatus,
    round: u64,
    rng: StdRng,
}

impl GameState {
    /// Deal `roster` into a shuffled card order.
    #[must_use]
    pub fn new(roster: Vec<Character>) -> Self {
        Self::with_rng(roster, StdRng::from_os_rng())
    }

    /// Same as [`GameState::new`] with a reproducible shuffle sequence.
    #[must_use]
    pub fn with_seed(roster: Vec<Character>, seed: u64) -> Self {
        Self::with_rng(roster, StdRng::seed_from_u64(seed))
    }

    fn with_rng(roster: Vec<Character>, mut rng: StdRng) -> Self {
        let cards = shuffled(&roster, &mut rng);
        Self {
            roster,
            cards,
            clicked: ClickedSet::new(),
            scores: ScoreBoard::default(),
            status: GameStatus::InProgress,
            round: 0,
            rng,
        }
    }

    /// Replace the roster and start a fresh round. The best score survives.
    pub fn set_roster(&mut self, roster: Vec<Character>) {
        self.roster = roster;
        self.reset();
        self.scores.record(self.clicked.len());
    }

    pub fn apply(&mut self, event: GameEvent) -> Result<Transition, GameError> {
        let transition = match event {
            GameEvent::Click(id) => self.click(id)?,
            GameEvent::Reset => self.reset(),
        };
        self.scores.record(self.clicked.len());
        Ok(transition)
    }

    /// Click the card at `index` in the current card order.
    pub fn click_at(&mut self, index: usize) -> Result<Transition, GameError> {
        let id = self
            .cards
            .get(index)
            .map(|card| card.id)
            .ok_or(GameError::NoSuchCard {
                index,
                count: self.cards.len(),
            })?;
        self.apply(GameEvent::Click(id))
    }

    fn click(&mut self, id: CharacterId) -> Result<Transition, GameError> {
        if self.status.is_terminal() {
            debug!("Ignoring click on {id} while round {} ends", self.round);
            return Ok(Transition::Ignored);
        }

        if !self.roster.iter().any(|character| character.id == id) {
            return Err(GameError::UnknownCharacter(id));
        }

        if !self.clicked.insert(id) {
            self.status = GameStatus::GameOver;
            info!(
                "Round {} over after {} card(s): {id} clicked twice",
                self.round,
                self.clicked.len()
            );
            return Ok(Transition::GameOver);
        }

        if self.clicked.len() == self.roster.len() {
            self.status = GameStatus::Won;
            info!("Round {} won with {} card(s)", self.round, self.clicked.len());
            return Ok(Transition::Won);
        }

        self.cards = shuffled(&self.cards, &mut self.rng);
        Ok(Transition::Advanced {
            score: self.clicked.len(),
        })
    }

    fn reset(&mut self) -> Transition {
        self.cards = shuffled(&self.roster, &mut self.rng);
        self.clicked.clear();
        self.status = GameStatus::InProgress;
        self.round += 1;
        Transition::Reset { round: self.round }
    }

    #[must_use]
    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[Character] {
        &self.cards
    }

    #[must_use]
    pub fn clicked(&self) -> &ClickedSet {
        &self.clicked
    }

    #[must_use]
    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
