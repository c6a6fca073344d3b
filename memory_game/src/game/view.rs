//! Render-ready snapshot of a game.
//!
//! Frontends draw a [`GameView`] and nothing else, so the terminal UI and
//! the plain text mode show the same thing.

use serde::Serialize;

use super::constants::{FOOTER, PROMPT, TITLE};
use super::entities::{CharacterId, GameStatus, ScoreBoard};
use super::state_machine::GameState;

/// One card in the grid.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CardView {
    /// Zero-based position in the grid, the index accepted by
    /// [`GameState::click_at`].
    pub position: usize,
    pub id: CharacterId,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HeaderView {
    pub title: &'static str,
    /// Status text, or the prompt while a round is in progress.
    pub message: String,
    pub status: GameStatus,
    pub scores: ScoreBoard,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BoardView {
    pub header: HeaderView,
    pub cards: Vec<CardView>,
    /// Set when the roster could not be loaded.
    pub notice: Option<String>,
    pub footer: &'static str,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum GameView {
    Loading,
    Board(BoardView),
}

impl GameView {
    /// Build the view for `state`.
    ///
    /// # Arguments
    ///
    /// * `state` - Current game state
    /// * `loading` - Whether the roster request is still pending
    /// * `notice` - Load failure message to show above the grid
    #[must_use]
    pub fn from_state(state: &GameState, loading: bool, notice: Option<&str>) -> Self {
        if loading {
            return Self::Loading;
        }

        let status = state.status();
        let message = if status.is_terminal() {
            status.to_string()
        } else {
            PROMPT.to_string()
        };

        let cards = state
            .cards()
            .iter()
            .enumerate()
            .map(|(position, character)| CardView {
                position,
                id: character.id,
                name: character.name.clone(),
                image: character.image.clone(),
            })
            .collect();

        Self::Board(BoardView {
            header: HeaderView {
                title: TITLE,
                message,
                status,
                scores: state.scores(),
            },
            cards,
            notice: notice.map(ToString::to_string),
            footer: FOOTER,
        })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Cards in the grid; empty while loading.
    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Loading => &[],
            Self::Board(board) => &board.cards,
        }
    }
}
