use std::time::Duration;

/// Character listing endpoint used when no other URL is configured.
pub const DEFAULT_API_URL: &str = "https://dattebayo-api.onrender.com/characters";

/// Number of characters dealt from the listing.
pub const DEFAULT_ROSTER_SIZE: usize = 8;

/// Largest roster the board layout handles.
pub const MAX_ROSTER_SIZE: usize = 20;

/// Pause between a win or game over and the next round.
pub const RESET_DELAY: Duration = Duration::from_millis(2000);

/// Header text while a round is in progress.
pub const PROMPT: &str = "Click each character only once";

pub const TITLE: &str = "Naruto Memory Game";

pub const FOOTER: &str = "Created by Melina Bedingfield";
