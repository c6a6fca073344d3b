//! Roster loading.
//!
//! The session only sees the [`RosterSource`] trait. Frontends supply an
//! implementation (an HTTP client in `mg_client`); tests supply fixed
//! rosters or failures.

pub mod errors;
pub mod models;

pub use errors::LoadError;
pub use models::{ApiCharacter, CharacterListing, parse_listing, select_roster};

use async_trait::async_trait;

use crate::game::entities::Character;

/// Something that can produce the character roster.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch at most `limit` characters.
    async fn fetch_roster(&self, limit: usize) -> errors::Result<Vec<Character>>;
}

/// A source that always returns the same characters.
#[derive(Clone, Debug, Default)]
pub struct StaticRoster {
    characters: Vec<Character>,
}

impl StaticRoster {
    #[must_use]
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }
}

#[async_trait]
impl RosterSource for StaticRoster {
    async fn fetch_roster(&self, limit: usize) -> errors::Result<Vec<Character>> {
        Ok(self.characters.iter().take(limit).cloned().collect())
    }
}
