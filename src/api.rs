use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::logic::count::resolve_total_count;
use crate::model::{EntityRecord, Level};

/// Why a level fetch failed.
///
/// `Unauthorized` is kept separate from the generic variants because the
/// caller surfaces it as "session expired" across the whole browser rather
/// than as a per-level load failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("session expired")]
    Unauthorized,
    #[error("server returned status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of a level's result set plus the server-side total
#[derive(Debug, Clone)]
pub struct EntityPage {
    pub items: Vec<EntityRecord>,
    /// Authoritative count of matching records server-side; may exceed
    /// `items.len()` since items are one page
    pub total_count: u64,
}

/// Read-only client for the portal's paginated list endpoints
#[derive(Clone)]
pub struct DirectoryClient {
    base_url: String,
    token: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            base_url,
            token,
            client: Client::new(),
        }
    }

    /// Fetch one page of entities for a level.
    ///
    /// `parent_id` is required for every level below the root; `search` is
    /// only sent for levels that support it. 401/403 are classified before
    /// any body parsing so an expired session never shows up as a decode
    /// error.
    pub async fn list_page(
        &self,
        level: Level,
        parent_id: Option<&str>,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<EntityPage, FetchError> {
        let mut url = format!(
            "{}/{}?page={}&pageSize={}",
            self.base_url,
            level.collection(),
            page,
            page_size
        );

        if let (Some(key), Some(id)) = (level.parent_key(), parent_id) {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(id)));
        }

        if let Some(term) = search.filter(|t| !t.is_empty()) {
            url.push_str(&format!("&search={}", urlencoding::encode(term)));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Total count rides in a header; grab headers before consuming the body
        let headers = response.headers().clone();
        let text = response.text().await?;
        let items: Vec<EntityRecord> = serde_json::from_str(&text)?;
        let total_count = resolve_total_count(&headers, items.len());

        Ok(EntityPage { items, total_count })
    }
}
