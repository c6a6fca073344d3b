//! HTTP client for the character listing API.

use async_trait::async_trait;
use memory_game::{
    entities::Character,
    loader::{CharacterListing, LoadError, RosterSource, errors, parse_listing, select_roster},
};
use std::time::Instant;

use crate::logging::log_performance;

/// API client for fetching the character listing
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client for the listing at `url`
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch and parse the full character listing
    pub async fn list_characters(&self) -> errors::Result<CharacterListing> {
        let started = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Listing request rejected");
            return Err(LoadError::Status {
                code: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Transport(format!("Failed to read response body: {e}")))?;

        let listing = parse_listing(&body)?;
        log_performance(
            "list_characters",
            started.elapsed().as_millis() as u64,
            Some(&self.url),
        );
        Ok(listing)
    }
}

#[async_trait]
impl RosterSource for ApiClient {
    async fn fetch_roster(&self, limit: usize) -> errors::Result<Vec<Character>> {
        let listing = self.list_characters().await?;
        tracing::debug!(
            available = listing.characters.len(),
            limit,
            "Selecting roster"
        );
        Ok(select_roster(listing, limit))
    }
}
