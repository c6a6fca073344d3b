//! Memory game engine.
//!
//! This module provides:
//! - Character and score entities
//! - The shuffle used for every deal
//! - The round state machine
//! - A render-ready view of the game

pub mod constants;
pub mod entities;
pub mod shuffle;
pub mod state_machine;
pub mod view;

pub use state_machine::{GameError, GameEvent, GameState, Transition};
pub use view::GameView;
