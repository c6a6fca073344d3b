//! Wire format of the character listing endpoint.

use serde::Deserialize;

use super::errors::Result;
use crate::game::entities::{Character, CharacterId};

/// Body of `GET /characters`. Pagination and other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CharacterListing {
    pub characters: Vec<ApiCharacter>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCharacter {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<ApiCharacter> for Character {
    fn from(value: ApiCharacter) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image: value.images.into_iter().next(),
        }
    }
}

/// Parse a response body into a listing.
pub fn parse_listing(body: &str) -> Result<CharacterListing> {
    Ok(serde_json::from_str(body)?)
}

/// Take the first `limit` entries of `listing` as the roster.
#[must_use]
pub fn select_roster(listing: CharacterListing, limit: usize) -> Vec<Character> {
    listing
        .characters
        .into_iter()
        .take(limit)
        .map(Character::from)
        .collect()
}
