//! Trello REST client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::{AppError, TrelloSettings};
use crate::ports::{BoardMember, Card, TaskBoard};

const SERVICE: &str = "Trello";

/// HTTP client for the Trello API.
#[derive(Clone)]
pub struct TrelloClient {
    app_key: String,
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloClient")
            .field("api_url", &self.api_url)
            .field("app_key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TrelloClient {
    pub fn new(settings: &TrelloSettings, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            app_key: settings.app_key.clone(),
            token: settings.token.clone(),
            api_url: settings.api_url.clone(),
            client,
        })
    }

    /// API URL extended by `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config_error(format!("Invalid Trello API URL: {}", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "Trello request");

        // Credentials travel in the query string, so transport errors drop the URL.
        let response = self
            .client
            .get(url.clone())
            .query(&[("key", self.app_key.as_str()), ("token", self.token.as_str())])
            .send()
            .map_err(|e| AppError::Http {
                service: SERVICE,
                details: format!("GET {}: {}", url.path(), e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let details =
                format!("GET {} returned {}: {}", url.path(), status.as_u16(), body.trim());
            return Err(AppError::Http { service: SERVICE, details });
        }

        response.json().map_err(|e| AppError::Decode {
            service: SERVICE,
            details: e.without_url().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiCard {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMember {
    id: String,
    username: String,
    #[serde(default)]
    full_name: Option<String>,
}

impl TaskBoard for TrelloClient {
    fn get_card(&self, card_id: &str) -> Result<Card, AppError> {
        let card: ApiCard = self.get_json(&["cards", card_id])?;
        Ok(Card { id: card.id, name: card.name })
    }

    fn get_card_members(&self, card: &Card) -> Result<Vec<BoardMember>, AppError> {
        let members: Vec<ApiMember> = self.get_json(&["cards", &card.id, "members"])?;
        Ok(members
            .into_iter()
            .map(|m| BoardMember { id: m.id, username: m.username, full_name: m.full_name })
            .collect())
    }
}
