use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a character by the listing API.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for CharacterId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A character as shown on a card.
///
/// Characters are immutable once loaded. The roster and every card order
/// hold clones of the same values.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    /// First image URL reported by the API, if any.
    pub image: Option<String>,
}

impl Character {
    #[must_use]
    pub fn new(id: u64, name: &str, image: Option<&str>) -> Self {
        Self {
            id: CharacterId(id),
            name: name.to_string(),
            image: image.map(ToString::to_string),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ids clicked during the current round, in click order.
///
/// Never holds the same id twice; a repeated click ends the round
/// before the id would be appended.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClickedSet {
    ids: Vec<CharacterId>,
}

impl ClickedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    /// Record a click. Returns `false` without modifying the set if the id
    /// was already clicked this round.
    pub fn insert(&mut self, id: CharacterId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterId> {
        self.ids.iter()
    }
}

/// Current and best score.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ScoreBoard {
    pub score: usize,
    pub best_score: usize,
}

impl ScoreBoard {
    /// Set the current score and fold it into the best score.
    pub fn record(&mut self, score: usize) {
        self.score = score;
        self.best_score = self.best_score.max(score);
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Best Score : {}  Score : {}", self.best_score, self.score)
    }
}

/// Round status shown in the header.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    GameOver,
    Won,
}

impl GameStatus {
    /// Whether the round has ended and is waiting for its reset.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::InProgress => "",
            Self::GameOver => "Game is over",
            Self::Won => "You Win",
        };
        write!(f, "{repr}")
    }
}
